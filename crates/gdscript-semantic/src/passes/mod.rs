mod calls;
mod control_flow;
mod declaration;
mod indentation;
mod scope;
mod syntax;
mod types;

pub use declaration::run as declaration_pass;
pub use indentation::run as indentation_pass;
pub use scope::run as analysis_pass;
pub use syntax::run as syntax_pass;
