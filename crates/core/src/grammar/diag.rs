pub use switch_options_diagnostics::{Diagnostic, LineIndex, Severity, Span, codes};
