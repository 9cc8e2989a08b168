// src/config.rs — 配置加载，支持文件覆盖

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// rofi 字体
    pub font: String,
    /// rofi 窗口位置 (0–8, 同 rofi -location)
    pub position: u8,
    pub x_offset: i32,
    pub y_offset: i32,
    /// 菜单最大显示行数
    pub max_lines: usize,
    /// 二维码纠错级别 (L/M/Q/H)
    pub ec_level: String,
    /// 导出 SVG 的边长（像素）
    pub qr_width: u32,
    /// 块字符渲染是否带静区
    pub quiet_zone: bool,
    /// SVG 导出路径，留空落到 ~/下载 或家目录
    pub export_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font: "DejaVu Sans Mono 8".into(),
            position: 0,
            x_offset: 0,
            y_offset: 0,
            max_lines: 8,
            ec_level: "Q".into(),
            qr_width: 1024,
            quiet_zone: true,
            export_path: None,
        }
    }
}

impl Config {
    /// 按优先级查找并加载配置文件
    pub fn load() -> Result<Self> {
        let candidates = config_candidates();
        for path in &candidates {
            if path.exists() {
                let text = std::fs::read_to_string(path)?;
                let cfg: Config = toml::from_str(&text)?;
                return Ok(cfg);
            }
        }
        Ok(Config::default())
    }

    /// SVG 落盘位置
    pub fn export_target(&self) -> PathBuf {
        if let Some(p) = &self.export_path {
            return p.clone();
        }
        dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wifi-qr.svg")
    }
}

fn config_candidates() -> Vec<PathBuf> {
    let mut v = vec![];
    // 同目录下的 config.toml
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            v.push(dir.join("config.toml"));
        }
    }
    // ~/.config/rofi/wifiqr.toml
    if let Some(home) = dirs::home_dir() {
        v.push(home.join(".config/rofi/wifiqr.toml"));
    }
    v
}
