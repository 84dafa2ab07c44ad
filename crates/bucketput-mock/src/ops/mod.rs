//! Simulated operation handlers.
//!
//! Each submodule exposes `handle_*` methods on [`crate::provider::MockS3`].
//! Handlers take an already-normalized payload so they stay synchronous and
//! run as one atomic check-then-mutate step.

pub(crate) mod object;
