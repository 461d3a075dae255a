/*!
 * Monitoring
 * Tracing setup for embedding applications
 */

mod tracer;

pub use tracer::{init_tracing, init_tracing_with, TracingConfig, DEFAULT_FILTER, TRACE_JSON_ENV};
