//! Integration tests for the pay counter session.

mod counter_flow;
mod mock_clock;
mod yearly_flow;
