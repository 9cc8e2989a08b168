// src/notify.rs — 桌面通知，降级到 stderr

use crate::controller::ErrorSink;
use crate::types::FormError;

pub enum Urgency {
    Low,
    Normal,
    Critical,
}

pub fn send(urgency: Urgency, title: &str, body: &str) {
    let u = match urgency {
        Urgency::Low => "low",
        Urgency::Normal => "normal",
        Urgency::Critical => "critical",
    };
    // 优先用 notify-send
    let ok = std::process::Command::new("notify-send")
        .args(["-u", u, &format!("Wi-Fi QR: {title}"), body])
        .status()
        .map(|s| s.success())
        .unwrap_or(false);

    if !ok {
        eprintln!(
            "[{u}] Wi-Fi QR: {title}{}",
            if body.is_empty() {
                String::new()
            } else {
                format!(": {body}")
            }
        );
    }
}

pub fn low(title: &str, body: &str) {
    send(Urgency::Low, title, body)
}

pub fn normal(title: &str, body: &str) {
    send(Urgency::Normal, title, body)
}

pub fn critical(title: &str, body: &str) {
    send(Urgency::Critical, title, body)
}

/// 交互表单用的上报通道：校验问题发普通通知，渲染炸了发紧急通知
pub struct DesktopSink;

impl ErrorSink for DesktopSink {
    fn form_error(&self, err: &FormError) {
        normal("表单未通过", &err.to_string());
    }
    fn render_error(&self, desc: &str) {
        critical("渲染失败", desc);
    }
}

/// 非交互（encode/decode 子命令）用的上报通道，直接落 stderr
pub struct StderrSink;

impl ErrorSink for StderrSink {
    fn form_error(&self, err: &FormError) {
        eprintln!("错误: {err}");
    }
    fn render_error(&self, desc: &str) {
        eprintln!("渲染失败: {desc}");
    }
}
