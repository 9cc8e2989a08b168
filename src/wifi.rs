// src/wifi.rs — WIFI: 串的序列化与解析

use crate::escape;
use crate::types::{field, Credential, RawFormInput};
use anyhow::{anyhow, Result};

/// WIFI: 串固定前缀
pub const PREFIX: &str = "WIFI:";

/// 字段 → 单字母码，顺序即输出顺序。
/// None 表示该字段永不写进 WIFI: 串（明文摘要只给人看）。
pub const FIELD_CODES: [(&str, Option<char>); 5] = [
    (field::TYPE, Some('T')),
    (field::SSID, Some('S')),
    (field::PASSWORD, Some('P')),
    (field::HIDDEN, Some('H')),
    (field::OVERLAY, None),
];

/// 凭据 → WIFI: 串。字段按 FIELD_CODES 声明顺序输出，
/// 值逐个过转义，末尾多补一个 ';'。对合法凭据必定成功。
pub fn serialize(cred: &Credential) -> String {
    let mut out = String::from(PREFIX);
    for (name, code) in FIELD_CODES {
        let code = match code {
            Some(c) => c,
            None => continue, // 排除字段
        };
        let value = match field_value(cred, name) {
            Some(v) => v,
            None => continue, // 未置位的旗标不占段
        };
        out.push(code);
        out.push(':');
        out.push_str(&escape::escape(&value));
        out.push(';');
    }
    out.push(';');
    out
}

/// 取某字段的待序列化文本；旗标为假等同缺席
fn field_value(cred: &Credential, name: &str) -> Option<String> {
    match name {
        field::TYPE => Some(cred.auth.to_string()),
        field::SSID => Some(cred.ssid.clone()),
        field::PASSWORD => Some(cred.password.clone()),
        field::HIDDEN => cred.hidden.then(|| "true".to_string()),
        field::OVERLAY => cred.show_overlay.then(|| "true".to_string()),
        _ => None,
    }
}

/// WIFI: 串 → 原始表单映射（decode 子命令用的逆向操作）。
/// 按未转义的 ';' 切段，码反查字段名，值做还原。
pub fn parse(input: &str) -> Result<RawFormInput> {
    let body = input
        .strip_prefix(PREFIX)
        .ok_or_else(|| anyhow!("缺少 {PREFIX} 前缀"))?;

    let mut out = RawFormInput::new();
    for seg in split_segments(body) {
        let (code, value) = seg
            .split_once(':')
            .ok_or_else(|| anyhow!("段「{seg}」缺少冒号"))?;
        let name = code_to_field(code).ok_or_else(|| anyhow!("未知字段码「{code}」"))?;
        out.insert(name.to_string(), escape::unescape(value));
    }
    Ok(out)
}

/// 按未转义的 ';' 切分，转义对原样保留给 unescape 处理；空段丢弃
fn split_segments(body: &str) -> Vec<String> {
    let mut segs = Vec::new();
    let mut cur = String::new();
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                cur.push('\\');
                if let Some(next) = chars.next() {
                    cur.push(next);
                }
            }
            ';' => {
                if !cur.is_empty() {
                    segs.push(std::mem::take(&mut cur));
                }
            }
            _ => cur.push(c),
        }
    }
    if !cur.is_empty() {
        segs.push(cur);
    }
    segs
}

/// 单字母码反查字段名；排除字段无码，所以永远查不到它
fn code_to_field(code: &str) -> Option<&'static str> {
    let mut chars = code.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    FIELD_CODES
        .iter()
        .find_map(|(name, fc)| (*fc == Some(c)).then_some(*name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AuthType;

    fn cred(auth: AuthType, ssid: &str, password: &str) -> Credential {
        Credential {
            auth,
            ssid: ssid.into(),
            password: password.into(),
            hidden: false,
            show_overlay: false,
        }
    }

    #[test]
    fn serializes_wpa_with_reserved_password() {
        let c = cred(AuthType::Wpa, "Home", "secret;pw");
        assert_eq!(serialize(&c), "WIFI:T:WPA;S:Home;P:secret\\;pw;;");
    }

    #[test]
    fn serializes_open_network_with_empty_password() {
        let c = cred(AuthType::Nopass, "Guest", "");
        assert_eq!(serialize(&c), "WIFI:T:nopass;S:Guest;P:;;");
    }

    #[test]
    fn hidden_flag_emits_h_segment_only_when_set() {
        let mut c = cred(AuthType::Wpa, "Home", "pw");
        assert!(!serialize(&c).contains("H:"));

        c.hidden = true;
        let s = serialize(&c);
        assert!(s.contains("H:true;"));
        assert_eq!(s, "WIFI:T:WPA;S:Home;P:pw;H:true;;");
    }

    #[test]
    fn overlay_flag_never_reaches_the_string() {
        let mut c = cred(AuthType::Wpa, "Home", "pw");
        let plain = serialize(&c);
        c.show_overlay = true;
        assert_eq!(serialize(&c), plain);
    }

    #[test]
    fn output_is_framed_by_prefix_and_semicolon() {
        for c in [
            cred(AuthType::Wep, "a", "b"),
            cred(AuthType::Nopass, "x", ""),
            cred(AuthType::Wpa, ";;;", "\\"),
        ] {
            let s = serialize(&c);
            assert!(s.starts_with("WIFI:"), "{s}");
            assert!(s.ends_with(';'), "{s}");
        }
    }

    #[test]
    fn field_order_follows_the_code_table() {
        let c = Credential {
            auth: AuthType::Wep,
            ssid: "Attic".into(),
            password: "pw".into(),
            hidden: true,
            show_overlay: false,
        };
        let s = serialize(&c);
        let t = s.find("T:").unwrap();
        let ss = s.find("S:").unwrap();
        let p = s.find("P:").unwrap();
        let h = s.find("H:").unwrap();
        assert!(t < ss && ss < p && p < h, "{s}");
    }

    #[test]
    fn parse_inverts_serialize() {
        let c = Credential {
            auth: AuthType::Wpa,
            ssid: "My;Net:\"x,y\\z\"".into(),
            password: "p@ss;w:rd".into(),
            hidden: true,
            show_overlay: false,
        };
        let map = parse(&serialize(&c)).unwrap();
        assert_eq!(map[field::TYPE], "WPA");
        assert_eq!(map[field::SSID], c.ssid);
        assert_eq!(map[field::PASSWORD], c.password);
        assert_eq!(map[field::HIDDEN], "true");
        assert!(!map.contains_key(field::OVERLAY));
    }

    #[test]
    fn parse_requires_the_prefix() {
        assert!(parse("T:WPA;S:Home;P:pw;;").is_err());
        assert!(parse("wifi:T:WPA;;").is_err());
    }

    #[test]
    fn parse_rejects_unknown_codes() {
        assert!(parse("WIFI:T:WPA;Z:zzz;;").is_err());
    }

    #[test]
    fn parse_keeps_escaped_semicolon_inside_value() {
        let map = parse("WIFI:T:WPA;S:Home;P:secret\\;pw;;").unwrap();
        assert_eq!(map[field::PASSWORD], "secret;pw");
    }
}
