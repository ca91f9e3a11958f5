//! Frame scheduling.
//!
//! The driver asks for one frame at a time. A request while a frame is
//! already pending is a no-op, so there is never more than one tick chain.
//! `cancel` drops the pending frame; the browser implementation maps this to
//! `requestAnimationFrame` / `cancelAnimationFrame`.

pub trait FrameScheduler {
    fn request(&mut self);
    fn cancel(&mut self);
    fn is_pending(&self) -> bool;
}
