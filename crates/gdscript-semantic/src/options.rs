//! Configuration surface for [`crate::validate_code`].

use serde::{Deserialize, Serialize};

/// Per-pass toggles for [`crate::validate_code`]. Every pass defaults
/// to on; hosts that only want a subset (an editor running a fast
/// syntax-only pass on every keystroke, say) can narrow it down. Loading
/// this from a host's project config file is the host's responsibility —
/// this crate only defines the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GDValidationOptions {
    pub check_syntax: bool,
    pub check_scope: bool,
    pub check_types: bool,
    pub check_calls: bool,
    pub check_control_flow: bool,
    pub check_indentation: bool,
}

impl Default for GDValidationOptions {
    fn default() -> Self {
        GDValidationOptions {
            check_syntax: true,
            check_scope: true,
            check_types: true,
            check_calls: true,
            check_control_flow: true,
            check_indentation: true,
        }
    }
}

impl GDValidationOptions {
    /// Every pass off, for callers that want to opt a handful back in.
    pub const fn none() -> Self {
        GDValidationOptions {
            check_syntax: false,
            check_scope: false,
            check_types: false,
            check_calls: false,
            check_control_flow: false,
            check_indentation: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_every_pass() {
        let options = GDValidationOptions::default();
        assert!(options.check_syntax);
        assert!(options.check_scope);
        assert!(options.check_types);
        assert!(options.check_calls);
        assert!(options.check_control_flow);
        assert!(options.check_indentation);
    }

    #[test]
    fn none_disables_every_pass() {
        let options = GDValidationOptions::none();
        assert!(!options.check_syntax);
        assert!(!options.check_indentation);
    }
}
