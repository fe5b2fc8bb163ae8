use async_trait::async_trait;

use crate::{api::LocationProvider, entities::Coordinates};

#[derive(Clone, Copy, Debug, Default)]
pub struct StaticLocation(pub Option<Coordinates>);

#[async_trait]
impl LocationProvider for StaticLocation {
    async fn current_location(&self) -> Option<Coordinates> {
        self.0
    }
}
