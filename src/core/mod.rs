pub mod animator;
pub mod background;
pub mod constants;
pub mod mesh;
pub mod page;
pub mod pointer;
pub mod reveal;
pub mod schedule;

pub use animator::Animator;
pub use background::Background;
pub use mesh::{Scene, Viewport};
pub use pointer::PointerTracker;
pub use reveal::{Intersection, Rect, RevealTracker};
pub use schedule::FrameSlot;
