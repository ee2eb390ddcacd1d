//! Liquid Transition Core — The Percent Animator
//!
//! Drives an interactive transition from a continuous gesture and hands it
//! off to a timed finish or cancel animation:
//! - **Percent:** Directional percent tracking with velocity sampling
//! - **Smoothing:** Blends gesture updates that grab a running animation
//! - **Frame timing:** Cancelable per-frame ramps over media time
//! - **Animator:** The state machine reconciling all of the above
//! - **Replay:** Offline playback of recorded gesture streams
//!
//! Single-threaded: observers are `Rc`/`Weak` handles and time
//! comes from an injected clock.

pub mod animator;
pub mod context;
pub mod frame;
pub mod percent;
pub mod replay;
pub mod smooth;

pub use animator::{AnimatorState, TransitionOutcome, TransitionPercentAnimator};
pub use context::{PercentDelegate, TransitionContext};
pub use frame::FrameTimer;
pub use percent::PercentSession;
pub use replay::{GestureReplay, ReplayOptions, ReplayReport};
pub use smooth::SmoothInteractive;
