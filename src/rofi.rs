// src/rofi.rs — 所有 rofi 调用封装

use crate::config::Config;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// 通用 rofi dmenu，返回用户选择的行，Esc 返回 None
pub async fn dmenu(
    items: &[String],
    prompt: &str,
    cfg: &Config,
    extra: &[&str], // 额外参数，如 -mesg、-filter、-password
) -> Option<String> {
    let input = items.join("\n");
    let mut args = vec![
        "-dmenu".to_string(),
        "-p".to_string(),
        prompt.to_string(),
        "-font".to_string(),
        cfg.font.clone(),
        "-location".to_string(),
        cfg.position.to_string(),
        "-yoffset".to_string(),
        cfg.y_offset.to_string(),
        "-xoffset".to_string(),
        cfg.x_offset.to_string(),
    ];
    for e in extra {
        args.push(e.to_string());
    }

    let mut child = Command::new("rofi")
        .args(&args)
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .spawn()
        .ok()?;

    // 异步写入候选项，写完后必须 drop/关闭 stdin
    // 否则 rofi 会一直等待更多输入而不显示界面
    if let Some(mut stdin) = child.stdin.take() {
        let _ = stdin.write_all(input.as_bytes()).await;
        // write_all 完成后 stdin 在此 drop，触发 EOF，rofi 才会渲染列表
    }

    let out = child.wait_with_output().await.ok()?;
    if out.status.success() {
        let s = String::from_utf8_lossy(&out.stdout).trim().to_string();
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    } else {
        None // 用户按了 Esc
    }
}

/// 单行文本输入，initial 预填进输入框（rofi -filter）
pub async fn input_prompt(prompt: &str, initial: &str, cfg: &Config) -> Option<String> {
    if initial.is_empty() {
        dmenu(&[], prompt, cfg, &["-lines", "0"]).await
    } else {
        dmenu(&[], prompt, cfg, &["-lines", "0", "-filter", initial]).await
    }
}

/// 单行密码输入（显示为圆点）
pub async fn password_prompt(hint: &str, cfg: &Config) -> Option<String> {
    let prompt = format!(
        "🔒 密码{}: ",
        if hint.is_empty() {
            String::new()
        } else {
            format!(" ({hint})")
        }
    );
    dmenu(&[], &prompt, cfg, &["-password", "-lines", "0"]).await
}

/// 二选一确认（返回 true = 确认）
pub async fn confirm(message: &str, cfg: &Config) -> bool {
    let items = vec!["是".to_string(), "否".to_string()];
    matches!(
        dmenu(&items, message, cfg, &["-lines", "2"])
            .await
            .as_deref(),
        Some("是")
    )
}

/// 表单主界面：字段行 + mesg 区的实时预览（摘要和二维码）
pub async fn form_menu(rows: &[String], preview: &str, cfg: &Config) -> Option<String> {
    // 预览里有二维码时按它定宽，否则按最长的字段行
    let qr_cols = preview
        .lines()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    let row_cols = rows.iter().map(|s| s.chars().count()).max().unwrap_or(40);
    let width = format!("-{}", qr_cols.max(row_cols) + 4);
    let lines = rows.len().min(cfg.max_lines).to_string();

    let mut extra: Vec<String> = vec![
        "-lines".into(),
        lines,
        "-width".into(),
        width,
        "-no-custom".into(),
    ];
    if !preview.is_empty() {
        extra.push("-mesg".into());
        extra.push(preview.to_string());
        // 块字符二维码要等宽字体才是方的；-font 后者覆盖前者
        extra.push("-font".into());
        extra.push("Monospace 9".into());
    }

    let extra_refs: Vec<&str> = extra.iter().map(String::as_str).collect();
    dmenu(rows, "📶 Wi-Fi 二维码", cfg, &extra_refs).await
}
