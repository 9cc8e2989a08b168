// src/types.rs — 所有核心数据类型

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 原始表单快照：控件名 → 原始字符串值。
/// 事件发生时一次性读出，可能不完整，也可能带无关键。
pub type RawFormInput = BTreeMap<String, String>;

/// 表单控件名（页面、命令行、JSON 输入共用同一套名字）
pub mod field {
    pub const TYPE: &str = "type";
    pub const SSID: &str = "ssid";
    pub const PASSWORD: &str = "wifipassword";
    pub const HIDDEN: &str = "hidden";
    pub const OVERLAY: &str = "detailoverlay";
}

/// 认证类型，取值即 WIFI: 串里的写法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthType {
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "nopass")]
    Nopass,
}

impl AuthType {
    /// 识别表单里的原始取值（区分大小写），认不出返回 None
    pub fn from_raw(s: &str) -> Option<Self> {
        match s {
            "WEP" => Some(AuthType::Wep),
            "WPA" => Some(AuthType::Wpa),
            "nopass" => Some(AuthType::Nopass),
            _ => None,
        }
    }
}

impl std::fmt::Display for AuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthType::Wep => write!(f, "WEP"),
            AuthType::Wpa => write!(f, "WPA"),
            AuthType::Nopass => write!(f, "nopass"),
        }
    }
}

/// 校验通过的凭据记录。只能由 schema::validate 构造，
/// 每次事件新建一份，跑完管线即丢弃，外部看不到半成品。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credential {
    pub auth: AuthType,
    /// 网络名，非空
    pub ssid: String,
    /// 允许为空串
    pub password: String,
    /// 隐藏网络标记，缺省为 false
    pub hidden: bool,
    /// 是否附明文摘要，缺省为 false；该字段永不序列化进 WIFI: 串
    pub show_overlay: bool,
}

/// 校验失败的三种情形
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// 表单快照为空
    NoData,
    /// 必填字段缺失（或 SSID 为空）
    MissingField(&'static str),
    /// 认证类型不在允许范围
    InvalidEnum { field: &'static str, value: String },
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::NoData => write!(f, "表单没有任何数据"),
            FormError::MissingField(name) => write!(f, "缺少必填字段 {name}"),
            FormError::InvalidEnum { field, value } => {
                write!(f, "字段 {field} 的值「{value}」不在允许范围")
            }
        }
    }
}

impl std::error::Error for FormError {}
