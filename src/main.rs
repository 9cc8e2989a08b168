// src/main.rs — 主入口 & 表单循环
mod config;
mod controller;
mod escape;
mod nmcli;
mod notify;
mod overlay;
mod qr;
mod rofi;
mod schema;
mod surface;
mod types;
mod wifi;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use controller::Controller;
use qr::BlockRender;
use std::path::PathBuf;
use std::sync::Arc;
use types::{field, AuthType, RawFormInput};

// ════════════════════════════════════════════════════════════════
// CLI 参数
// ════════════════════════════════════════════════════════════════

#[derive(Parser)]
#[command(name = "rofi-wifiqr", about = "rofi Wi-Fi 分享二维码", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// 不弹界面，直接生成二维码打到 stdout
    Encode {
        /// 认证类型 (WEP / WPA / nopass)
        #[arg(long = "type", value_name = "AUTH")]
        auth: Option<String>,
        /// 网络名
        #[arg(long)]
        ssid: Option<String>,
        /// 密码，省略视为无密码
        #[arg(long)]
        password: Option<String>,
        /// 隐藏网络
        #[arg(long)]
        hidden: bool,
        /// 在二维码上方附明文摘要
        #[arg(long)]
        overlay: bool,
        /// 改从 stdin 读 JSON 表单（字段名同网页控件）
        #[arg(long)]
        json: bool,
        /// 把 SVG 写到该路径
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// 用当前连接的 Wi-Fi 预填缺省字段
        #[arg(long)]
        current: bool,
    },
    /// 解析 WIFI: 串，按 JSON 打出各字段
    Decode {
        /// 形如 "WIFI:T:WPA;S:家里;P:口令;;" 的串
        code: String,
    },
}

// ════════════════════════════════════════════════════════════════
// 入口
// ════════════════════════════════════════════════════════════════

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = Config::load().unwrap_or_default();

    match cli.cmd {
        Some(Cmd::Encode {
            auth,
            ssid,
            password,
            hidden,
            overlay,
            json,
            out,
            current,
        }) => {
            let raw = if json {
                read_json_form()?
            } else {
                cli_form(auth, ssid, password, hidden, overlay, current).await
            };
            run_encode(raw, out, &cfg).await
        }
        Some(Cmd::Decode { code }) => run_decode(&code),
        None => run_form(&cfg).await,
    }
}

fn renderer(cfg: &Config) -> Arc<BlockRender> {
    Arc::new(BlockRender {
        ec: qr::parse_ec(&cfg.ec_level),
        width: cfg.qr_width,
        quiet_zone: cfg.quiet_zone,
    })
}

// ════════════════════════════════════════════════════════════════
// encode / decode 子命令
// ════════════════════════════════════════════════════════════════

/// 把命令行参数拼成表单快照；什么都没给就还给空快照
async fn cli_form(
    auth: Option<String>,
    ssid: Option<String>,
    password: Option<String>,
    hidden: bool,
    overlay: bool,
    current: bool,
) -> RawFormInput {
    let (mut auth, mut ssid, mut password) = (auth, ssid, password);
    if current {
        let pre = nmcli::prefill().await;
        if ssid.is_none() {
            ssid = pre.ssid;
        }
        if password.is_none() {
            password = pre.password;
        }
        if auth.is_none() {
            auth = pre.auth.map(|a| a.to_string());
        }
    }

    let mut raw = RawFormInput::new();
    if auth.is_none() && ssid.is_none() && password.is_none() && !hidden && !overlay {
        return raw;
    }
    if let Some(v) = auth {
        raw.insert(field::TYPE.into(), v);
    }
    if let Some(v) = ssid {
        raw.insert(field::SSID.into(), v);
    }
    raw.insert(field::PASSWORD.into(), password.unwrap_or_default());
    if hidden {
        raw.insert(field::HIDDEN.into(), "true".into());
    }
    if overlay {
        raw.insert(field::OVERLAY.into(), "true".into());
    }
    raw
}

/// 从 stdin 读 JSON 对象当表单快照。
/// 标量一律转成字符串，布尔 true 变 "true"，和网页控件口径一致。
fn read_json_form() -> Result<RawFormInput> {
    use std::io::Read as _;
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("读取 stdin 失败")?;
    let value: serde_json::Value = serde_json::from_str(&text).context("stdin 不是合法 JSON")?;
    json_form(value)
}

fn json_form(value: serde_json::Value) -> Result<RawFormInput> {
    let obj = match value {
        serde_json::Value::Object(m) => m,
        _ => anyhow::bail!("表单 JSON 必须是对象"),
    };
    let mut raw = RawFormInput::new();
    for (k, v) in obj {
        let s = match v {
            serde_json::Value::String(s) => s,
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Null => continue,
            other => anyhow::bail!("字段 {k} 的值 {other} 不是标量"),
        };
        raw.insert(k, s);
    }
    Ok(raw)
}

async fn run_encode(raw: RawFormInput, out: Option<PathBuf>, cfg: &Config) -> Result<()> {
    let mut ctl = Controller::new(renderer(cfg), Arc::new(notify::StderrSink));
    ctl.handle_event(raw);
    ctl.settle().await;

    // 校验或渲染没过：错误已落 stderr
    let Some(img) = ctl.surface().image().and_then(|s| s.get()) else {
        std::process::exit(1);
    };

    println!("{}", ctl.surface().to_text());

    if let Some(path) = out {
        std::fs::write(&path, &img.svg)
            .with_context(|| format!("写入 {} 失败", path.display()))?;
        eprintln!("SVG 已写入 {}", path.display());
    }
    Ok(())
}

/// 解析并校验 WIFI: 串，按表单字段名打出 JSON。
/// 输出可以原样喂回 `encode --json`。
fn run_decode(code: &str) -> Result<()> {
    let raw = wifi::parse(code)?;
    schema::validate(&raw)?;
    println!("{}", serde_json::to_string_pretty(&raw)?);
    Ok(())
}

// ════════════════════════════════════════════════════════════════
// 交互表单（字段一改就重新出码）
// ════════════════════════════════════════════════════════════════

/// 表单控件的当前取值，等价于网页里那几个输入框
#[derive(Debug, Clone)]
struct Form {
    auth: AuthType,
    ssid: String,
    password: String,
    hidden: bool,
    overlay: bool,
}

impl Form {
    fn new() -> Self {
        Self {
            auth: AuthType::Wpa,
            ssid: String::new(),
            password: String::new(),
            hidden: false,
            overlay: false,
        }
    }

    /// 读一次控件快照。选择框和文本框永远在场（哪怕是空串），
    /// 勾选框只有勾上才出现，和浏览器 FormData 的行为一致。
    fn snapshot(&self) -> RawFormInput {
        let mut raw = RawFormInput::new();
        raw.insert(field::TYPE.into(), self.auth.to_string());
        raw.insert(field::SSID.into(), self.ssid.clone());
        raw.insert(field::PASSWORD.into(), self.password.clone());
        if self.hidden {
            raw.insert(field::HIDDEN.into(), "true".into());
        }
        if self.overlay {
            raw.insert(field::OVERLAY.into(), "true".into());
        }
        raw
    }
}

fn form_rows(form: &Form) -> Vec<String> {
    let mark = |b: bool| if b { "✔" } else { "✘" };
    let ssid = if form.ssid.is_empty() {
        "<未填>".to_string()
    } else {
        form.ssid.clone()
    };
    let password = if form.password.is_empty() {
        "<无>".to_string()
    } else {
        "•".repeat(form.password.chars().count())
    };
    vec![
        format!("🔐 认证: {}", form.auth),
        format!("📶 网络: {ssid}"),
        format!("🔑 密码: {password}"),
        format!("👻 隐藏网络: {}", mark(form.hidden)),
        format!("📝 明文摘要: {}", mark(form.overlay)),
        "💾 导出 SVG".into(),
        "❌ 退出".into(),
    ]
}

/// rofi 表单循环：字段行就是菜单项，选中即编辑，
/// mesg 区实时挂着摘要和二维码
async fn run_form(cfg: &Config) -> Result<()> {
    let mut ctl = Controller::new(renderer(cfg), Arc::new(notify::DesktopSink));
    let mut form = Form::new();

    // 用当前连接的网络预填
    let pre = nmcli::prefill().await;
    if let Some(ssid) = pre.ssid {
        form.ssid = ssid;
    }
    if let Some(p) = pre.password {
        form.password = p;
    }
    if let Some(a) = pre.auth {
        form.auth = a;
    }

    // 预填到位就先出一版码，打开窗口不用干等
    if !form.ssid.is_empty() {
        ctl.handle_event(form.snapshot());
        ctl.settle().await;
    }

    loop {
        let rows = form_rows(&form);
        let preview = ctl.surface().to_text();
        // 主界面按 Esc → 退出程序
        let choice = match rofi::form_menu(&rows, &preview, cfg).await {
            Some(c) => c,
            None => return Ok(()),
        };

        let mut edited = false;
        match choice.trim() {
            s if s.starts_with("🔐") => {
                let items: Vec<String> = [AuthType::Wpa, AuthType::Wep, AuthType::Nopass]
                    .iter()
                    .map(|a| a.to_string())
                    .collect();
                // 选择框按 Esc → 回表单，不动原值
                if let Some(pick) =
                    rofi::dmenu(&items, "🔐 认证类型: ", cfg, &["-lines", "3", "-no-custom"]).await
                {
                    if let Some(a) = AuthType::from_raw(&pick) {
                        form.auth = a;
                        edited = true;
                    }
                }
            }
            s if s.starts_with("📶") => {
                if let Some(ssid) = rofi::input_prompt("📶 网络名: ", &form.ssid, cfg).await {
                    form.ssid = ssid;
                    edited = true;
                }
            }
            s if s.starts_with("🔑") => {
                if let Some(p) = rofi::password_prompt("", cfg).await {
                    form.password = p;
                    edited = true;
                }
            }
            s if s.starts_with("👻") => {
                form.hidden = !form.hidden;
                edited = true;
            }
            s if s.starts_with("📝") => {
                form.overlay = !form.overlay;
                edited = true;
            }
            s if s.starts_with("💾") => export_svg(&ctl, cfg).await,
            _ => return Ok(()), // ❌ 退出
        }

        // 网页上的 change 事件：有修改立刻整轮重走管线
        if edited {
            ctl.handle_event(form.snapshot());
            ctl.settle().await;
        }
    }
}

async fn export_svg(ctl: &Controller, cfg: &Config) {
    let Some(img) = ctl.surface().image().and_then(|s| s.get()) else {
        notify::normal("还没有二维码", "先把表单填完整");
        return;
    };
    let path = cfg.export_target();
    // 覆盖确认按 Esc → 放弃导出
    if path.exists() && !rofi::confirm(&format!("覆盖 {}？", path.display()), cfg).await {
        return;
    }
    match std::fs::write(&path, &img.svg) {
        Ok(_) => notify::low("已导出", &path.display().to_string()),
        Err(e) => notify::critical("导出失败", &e.to_string()),
    }
}
