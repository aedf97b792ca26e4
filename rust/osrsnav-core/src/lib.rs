pub mod edge;
pub mod encoder;
pub mod error;
pub mod models;
pub mod pattern;
pub mod session;
pub mod skill;
pub mod walker;

pub use edge::{decode_route, Edge, EdgeAction, EdgeKind, Traversal};
pub use encoder::snapshot;
pub use error::{CodecError, EdgeDecodeError};
pub use models::{Coordinate, DataSelection, GameState, PathGenerationRequest};
pub use pattern::Pattern;
pub use session::{HeldItem, Interactor, RecordedSession, SceneObject, SessionReader};
pub use skill::Skill;
pub use walker::{PathWalker, WalkStatus};

pub fn version() -> &'static str { env!("CARGO_PKG_VERSION") }
