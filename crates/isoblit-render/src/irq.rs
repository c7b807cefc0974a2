//! Interrupt-suppression contract around a frame.
//!
//! The surrounding firmware runs timer interrupts (millisecond
//! timekeeping, audio output-compare toggling) that can preempt the
//! foreground loop mid-blit. A write-window transaction on the shared
//! peripheral bus must not be interleaved with interrupt traffic, so
//! one frame-driver invocation runs with interrupts suppressed,
//! accepting bounded audio jitter.
//!
//! On the host this becomes a guard-object abstraction: `suppress`
//! returns a guard whose `Drop` restores interrupts on every exit path.

/// Platform interrupt-suppression scope.
pub trait InterruptPolicy {
    /// Guard holding interrupts off; dropping it restores them.
    type Guard;

    fn suppress(&mut self) -> Self::Guard;
}

/// Host policy: nothing to suppress.
#[derive(Debug, Default)]
pub struct NoInterrupts;

impl InterruptPolicy for NoInterrupts {
    type Guard = ();

    fn suppress(&mut self) {}
}
