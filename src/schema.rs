// src/schema.rs — 原始表单输入的逐字段校验

use crate::types::{field, AuthType, Credential, FormError, RawFormInput};

/// 把原始快照校验成 Credential，按声明顺序检查，第一处失败即返回。
/// 刻意只做类型层面的检查，不管 SSID 长度、字符集这类网络层规则。
pub fn validate(raw: &RawFormInput) -> Result<Credential, FormError> {
    let auth = match raw.get(field::TYPE) {
        None => return Err(FormError::MissingField(field::TYPE)),
        Some(v) => match AuthType::from_raw(v) {
            Some(auth) => auth,
            None => {
                return Err(FormError::InvalidEnum {
                    field: field::TYPE,
                    value: v.clone(),
                })
            }
        },
    };

    // 空 SSID 和缺失同等对待
    let ssid = match raw.get(field::SSID) {
        Some(v) if !v.is_empty() => v.clone(),
        _ => return Err(FormError::MissingField(field::SSID)),
    };

    let password = match raw.get(field::PASSWORD) {
        Some(v) => v.clone(),
        None => return Err(FormError::MissingField(field::PASSWORD)),
    };

    Ok(Credential {
        auth,
        ssid,
        password,
        hidden: flag(raw, field::HIDDEN),
        show_overlay: flag(raw, field::OVERLAY),
    })
}

/// 旗标字段：只有字面量 "true" 算真，其余取值（含缺失）一律为假，
/// 永远不会让校验失败。
fn flag(raw: &RawFormInput, key: &str) -> bool {
    raw.get(key).map(|v| v == "true").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entries: &[(&str, &str)]) -> RawFormInput {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn builds_credential_from_valid_input() {
        let input = raw(&[
            (field::TYPE, "WPA"),
            (field::SSID, "Home"),
            (field::PASSWORD, "secret;pw"),
        ]);
        let cred = validate(&input).unwrap();
        assert_eq!(cred.auth, AuthType::Wpa);
        assert_eq!(cred.ssid, "Home");
        assert_eq!(cred.password, "secret;pw");
        assert!(!cred.hidden);
        assert!(!cred.show_overlay);
    }

    #[test]
    fn missing_ssid_fails() {
        let input = raw(&[(field::TYPE, "WPA"), (field::PASSWORD, "x")]);
        assert_eq!(
            validate(&input),
            Err(FormError::MissingField(field::SSID))
        );
    }

    #[test]
    fn empty_ssid_counts_as_missing() {
        let input = raw(&[
            (field::TYPE, "WPA"),
            (field::SSID, ""),
            (field::PASSWORD, "x"),
        ]);
        assert_eq!(
            validate(&input),
            Err(FormError::MissingField(field::SSID))
        );
    }

    #[test]
    fn missing_password_fails() {
        let input = raw(&[(field::TYPE, "nopass"), (field::SSID, "Guest")]);
        assert_eq!(
            validate(&input),
            Err(FormError::MissingField(field::PASSWORD))
        );
    }

    #[test]
    fn empty_password_is_allowed() {
        let input = raw(&[
            (field::TYPE, "nopass"),
            (field::SSID, "Guest"),
            (field::PASSWORD, ""),
        ]);
        assert_eq!(validate(&input).unwrap().password, "");
    }

    #[test]
    fn unknown_type_fails_with_invalid_enum() {
        let input = raw(&[
            (field::TYPE, "bogus"),
            (field::SSID, "X"),
            (field::PASSWORD, "Y"),
        ]);
        assert_eq!(
            validate(&input),
            Err(FormError::InvalidEnum {
                field: field::TYPE,
                value: "bogus".into(),
            })
        );
    }

    #[test]
    fn absent_type_fails_with_missing_field() {
        let input = raw(&[(field::SSID, "X"), (field::PASSWORD, "Y")]);
        assert_eq!(
            validate(&input),
            Err(FormError::MissingField(field::TYPE))
        );
    }

    #[test]
    fn flags_accept_only_the_true_sentinel() {
        for (value, expect) in [
            ("true", true),
            ("false", false),
            ("TRUE", false),
            ("1", false),
            ("", false),
        ] {
            let input = raw(&[
                (field::TYPE, "WPA"),
                (field::SSID, "Home"),
                (field::PASSWORD, "pw"),
                (field::HIDDEN, value),
                (field::OVERLAY, value),
            ]);
            let cred = validate(&input).unwrap();
            assert_eq!(cred.hidden, expect, "hidden={value:?}");
            assert_eq!(cred.show_overlay, expect, "overlay={value:?}");
        }
    }

    #[test]
    fn absent_flags_default_to_false() {
        let input = raw(&[
            (field::TYPE, "WPA"),
            (field::SSID, "Home"),
            (field::PASSWORD, "pw"),
        ]);
        let cred = validate(&input).unwrap();
        assert!(!cred.hidden);
        assert!(!cred.show_overlay);
    }

    #[test]
    fn unexpected_keys_are_ignored() {
        let input = raw(&[
            (field::TYPE, "WEP"),
            (field::SSID, "Attic"),
            (field::PASSWORD, "pw"),
            ("csrf_token", "zzz"),
            ("submit", "go"),
        ]);
        assert!(validate(&input).is_ok());
    }
}
