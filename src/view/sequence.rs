#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct Sequence {
    latest: u64,
}

impl Sequence {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[test]
fn latest_ticket_wins_test() {
    let mut sequence = Sequence::default();

    let first = sequence.issue();
    assert!(sequence.is_current(first));

    let second = sequence.issue();
    assert!(!sequence.is_current(first));
    assert!(sequence.is_current(second));

    sequence.invalidate();
    assert!(!sequence.is_current(second));
}
