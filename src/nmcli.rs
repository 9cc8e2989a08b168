// src/nmcli.rs — 从 NetworkManager 预取当前网络，供表单预填

use crate::types::AuthType;
use tokio::process::Command;

/// 表单预填内容：当前连接的 SSID、口令和安全类型
#[derive(Debug, Default)]
pub struct Prefill {
    pub ssid: Option<String>,
    pub password: Option<String>,
    pub auth: Option<AuthType>,
}

/// 并发抓取预填数据。没连网就各项留空，不算错误。
pub async fn prefill() -> Prefill {
    let Some(ssid) = current_ssid().await else {
        return Prefill::default();
    };
    let (password, auth) = tokio::join!(saved_password(&ssid), current_auth());
    Prefill {
        ssid: Some(ssid),
        password,
        auth,
    }
}

/// 当前已连接的 SSID（None 表示未连接）
pub async fn current_ssid() -> Option<String> {
    let out = Command::new("nmcli")
        .env("LANGUAGE", "C")
        .args(["-t", "-f", "active,ssid", "dev", "wifi"])
        .output()
        .await
        .ok()?;
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .find(|l| l.starts_with("yes:"))
        .map(|l| l[4..].to_string())
}

/// 查询已保存连接的密码（需要 polkit 授权）
pub async fn saved_password(ssid: &str) -> Option<String> {
    let out = Command::new("nmcli")
        .args([
            "-s",
            "-t",
            "-f",
            "802-11-wireless-security.psk",
            "connection",
            "show",
            ssid,
        ])
        .output()
        .await
        .ok()?;
    let s = String::from_utf8_lossy(&out.stdout);
    s.lines()
        .find(|l| l.contains("802-11-wireless-security.psk"))
        .and_then(|l| l.split(':').nth(1))
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

/// 当前连接的安全类型
pub async fn current_auth() -> Option<AuthType> {
    let out = Command::new("nmcli")
        .args(["-t", "-f", "IN-USE,SECURITY", "dev", "wifi"])
        .output()
        .await
        .ok()?;
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .find(|l| l.starts_with("*:"))
        .map(|l| auth_from_security(&l[2..]))
}

/// nmcli 的 SECURITY 描述映射到表单认证类型
fn auth_from_security(sec: &str) -> AuthType {
    let s = sec.to_uppercase();
    if s.contains("WPA") {
        AuthType::Wpa
    } else if s.contains("WEP") {
        AuthType::Wep
    } else {
        AuthType::Nopass
    }
}
