pub mod severity_precedence;

pub use severity_precedence::SeverityPrecedence;
