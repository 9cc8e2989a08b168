// src/surface.rs — 展示面模型：子节点容器 + 异步图像槽

use std::sync::{Arc, OnceLock};

/// 渲染器的产物：屏显块字符 + 可导出的 SVG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    pub glyphs: String,
    pub svg: String,
}

/// 异步填充的图像占位槽，只写一次。
/// 每轮管线新建一个；旧轮任务手里的槽已不挂在展示面上，
/// 迟到的写入因此不可见。
#[derive(Debug, Clone, Default)]
pub struct ImageSlot(Arc<OnceLock<QrImage>>);

impl ImageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 渲染任务完成时调用；重复写入被忽略
    pub fn fill(&self, img: QrImage) {
        let _ = self.0.set(img);
    }

    pub fn get(&self) -> Option<QrImage> {
        self.0.get().cloned()
    }
}

/// 展示面上的一个子节点
#[derive(Debug, Clone)]
pub enum Node {
    /// 空节点（摘要关闭时仍占一个子位）
    Blank,
    /// 明文摘要：固定标题 + SSID + 密码，刻意不做转义
    Overlay {
        heading: &'static str,
        ssid: String,
        password: String,
    },
    /// 二维码图像槽
    Image(ImageSlot),
}

/// 单一挂载点：只支持清空和追加，只有 Controller 改它，
/// 前端拿到的是只读视图。
#[derive(Debug, Default)]
pub struct Surface {
    children: Vec<Node>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// 移除所有子节点
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// 追加子节点
    pub fn append(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// 当前挂着的图像槽（最后一个 Image 节点）
    pub fn image(&self) -> Option<&ImageSlot> {
        self.children.iter().rev().find_map(|n| match n {
            Node::Image(slot) => Some(slot),
            _ => None,
        })
    }

    /// 渲染成 rofi -mesg / 终端可显示的文本块
    pub fn to_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        for node in &self.children {
            match node {
                Node::Blank => {}
                Node::Overlay {
                    heading,
                    ssid,
                    password,
                } => {
                    parts.push(format!("{heading}\n{ssid}\n{password}"));
                }
                Node::Image(slot) => match slot.get() {
                    Some(img) => parts.push(img.glyphs),
                    None => parts.push("…二维码生成中".to_string()),
                },
            }
        }
        parts.join("\n\n")
    }
}
