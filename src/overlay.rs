// src/overlay.rs — 可选的明文摘要节点

use crate::surface::Node;
use crate::types::Credential;

/// 摘要的固定标题
const HEADING: &str = "WIFI";

/// 按 show_overlay 生成摘要节点；关闭时给空节点占位。
/// SSID 和密码是给人看的，刻意一个字符都不转义，
/// 这点和序列化器是两回事。
pub fn present(cred: &Credential) -> Node {
    if cred.show_overlay {
        Node::Overlay {
            heading: HEADING,
            ssid: cred.ssid.clone(),
            password: cred.password.clone(),
        }
    } else {
        Node::Blank
    }
}
