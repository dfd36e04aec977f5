//! Per-query enablement gate.

use super::policy::RewritePolicy;
use ormlike_proto::Value;

/// The per-query rewrite setting as seen by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionFlag {
    /// No setting attached to the query.
    #[default]
    Unset,
    /// Setting is `true`.
    Enabled,
    /// Setting is `false`.
    Disabled,
    /// Setting is present but not a boolean.
    NonBoolean,
}

impl SessionFlag {
    /// Classify a raw setting value.
    pub fn from_setting(setting: Option<&Value>) -> Self {
        match setting {
            None => SessionFlag::Unset,
            Some(Value::Bool(true)) => SessionFlag::Enabled,
            Some(Value::Bool(false)) => SessionFlag::Disabled,
            Some(_) => SessionFlag::NonBoolean,
        }
    }
}

/// Decide whether a query is rewritten at all.
///
/// Without `require_session_flag` every query is rewritten, whatever its
/// flag. With it, only an explicit `true` turns rewriting on.
pub fn should_rewrite(flag: SessionFlag, policy: &RewritePolicy) -> bool {
    match (policy.require_session_flag, flag) {
        (false, _) => true,
        (true, SessionFlag::Enabled) => true,
        (true, SessionFlag::Unset | SessionFlag::Disabled | SessionFlag::NonBoolean) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_from_setting() {
        assert_eq!(SessionFlag::from_setting(None), SessionFlag::Unset);
        assert_eq!(
            SessionFlag::from_setting(Some(&Value::Bool(true))),
            SessionFlag::Enabled
        );
        assert_eq!(
            SessionFlag::from_setting(Some(&Value::Bool(false))),
            SessionFlag::Disabled
        );
        assert_eq!(
            SessionFlag::from_setting(Some(&Value::String("true".into()))),
            SessionFlag::NonBoolean
        );
        assert_eq!(
            SessionFlag::from_setting(Some(&Value::Null)),
            SessionFlag::NonBoolean
        );
    }

    #[test]
    fn test_gate_open_by_default() {
        let policy = RewritePolicy::default();
        for flag in [
            SessionFlag::Unset,
            SessionFlag::Enabled,
            SessionFlag::Disabled,
            SessionFlag::NonBoolean,
        ] {
            assert!(should_rewrite(flag, &policy), "{flag:?}");
        }
    }

    #[test]
    fn test_gate_requires_true_flag() {
        let policy = RewritePolicy::new().require_session_flag(true);
        assert!(should_rewrite(SessionFlag::Enabled, &policy));
        assert!(!should_rewrite(SessionFlag::Unset, &policy));
        assert!(!should_rewrite(SessionFlag::Disabled, &policy));
        assert!(!should_rewrite(SessionFlag::NonBoolean, &policy));
    }
}
