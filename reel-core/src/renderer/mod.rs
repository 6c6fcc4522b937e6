pub mod driver;
pub mod terminal;

use std::sync::Arc;

use crate::scene::Scene;

/// A front end the driver shows scenes on. Called from the driver thread and,
/// for repaints, from task threads.
pub trait Canvas: Send + Sync {
    /// `scene` becomes the one painted and clicked from now on.
    fn install(&self, scene: Arc<Scene>);

    /// The installed scene changed; paint a fresh snapshot when convenient.
    fn request_repaint(&self);

    /// The game is over.
    fn finish(&self);
}
