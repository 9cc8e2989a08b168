// src/qr.rs — 用 qrcode crate 生成块字符 + SVG 双份图像

use crate::controller::QrRender;
use crate::surface::QrImage;
use anyhow::Result;
use qrcode::render::{svg, unicode};
use qrcode::{EcLevel, QrCode};

/// 生产渲染器：同一个 QrCode 渲染两份。
/// UTF-8 块字符给 rofi/终端屏显，SVG 按配置的像素宽度给导出。
#[derive(Debug, Clone)]
pub struct BlockRender {
    pub ec: EcLevel,
    /// SVG 最小边长（像素）
    pub width: u32,
    pub quiet_zone: bool,
}

impl QrRender for BlockRender {
    fn render(&self, data: &str) -> Result<QrImage> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), self.ec)?;

        let image = code
            .render::<unicode::Dense1x2>()
            .quiet_zone(self.quiet_zone)
            .build();
        // 每行加两个前导空格，rofi 显示时稍微居中
        let glyphs = image
            .lines()
            .map(|l| format!("  {l}"))
            .collect::<Vec<_>>()
            .join("\n");

        let svg = code
            .render::<svg::Color>()
            .min_dimensions(self.width, self.width)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();

        Ok(QrImage { glyphs, svg })
    }
}

/// 纠错等级字母 → EcLevel。认不出的字母回落到 Q（约 25% 容错）
pub fn parse_ec(letter: &str) -> EcLevel {
    match letter {
        "L" => EcLevel::L,
        "M" => EcLevel::M,
        "H" => EcLevel::H,
        _ => EcLevel::Q,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_both_forms_for_a_sample_string() {
        let r = BlockRender {
            ec: EcLevel::Q,
            width: 1024,
            quiet_zone: true,
        };
        let img = r.render("WIFI:T:WPA;S:Home;P:pw;;").unwrap();
        assert!(!img.glyphs.is_empty());
        assert!(img.glyphs.lines().all(|l| l.starts_with("  ")));
        assert!(img.svg.contains("<svg"));
    }

    #[test]
    fn ec_letter_defaults_to_q() {
        assert_eq!(parse_ec("L"), EcLevel::L);
        assert_eq!(parse_ec("M"), EcLevel::M);
        assert_eq!(parse_ec("H"), EcLevel::H);
        assert_eq!(parse_ec("Q"), EcLevel::Q);
        assert_eq!(parse_ec("x"), EcLevel::Q);
        assert_eq!(parse_ec(""), EcLevel::Q);
    }
}
