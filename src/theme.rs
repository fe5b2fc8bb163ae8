use std::sync::{Arc, OnceLock};

use tokio::sync::watch;

use crate::entities::Theme;

#[derive(Clone, Debug)]
pub struct ThemeStore {
    sender: Arc<watch::Sender<Theme>>,
}

impl ThemeStore {
    pub fn new(initial: Theme) -> Self {
        let (sender, _) = watch::channel(initial);

        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn global() -> &'static ThemeStore {
        static STORE: OnceLock<ThemeStore> = OnceLock::new();
        STORE.get_or_init(|| ThemeStore::new(Theme::default()))
    }

    pub fn current(&self) -> Theme {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.sender.subscribe()
    }

    #[tracing::instrument(skip(self))]
    pub fn toggle(&self) -> Theme {
        self.sender.send_modify(|theme| *theme = theme.toggled());

        let theme = self.current();
        tracing::info!("theme is now {:?}", theme);
        theme
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

#[test]
fn toggle_flips_theme_test() {
    let store = ThemeStore::default();

    assert_eq!(store.current(), Theme::Light);
    assert_eq!(store.toggle(), Theme::Dark);
    assert_eq!(store.current(), Theme::Dark);
    assert_eq!(store.toggle(), Theme::Light);
}

#[tokio::test]
async fn subscribers_see_toggle_test() {
    let store = ThemeStore::default();
    let mut first = store.subscribe();
    let mut second = store.clone().subscribe();

    store.toggle();

    tokio_test::assert_ok!(first.changed().await);
    tokio_test::assert_ok!(second.changed().await);
    assert_eq!(*first.borrow(), Theme::Dark);
    assert_eq!(*second.borrow(), Theme::Dark);
}

#[test]
fn global_store_is_shared_test() {
    assert!(std::ptr::eq(ThemeStore::global(), ThemeStore::global()));
}
