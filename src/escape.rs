// src/escape.rs — WIFI: 串保留字符的转义与还原

/// 转义保留字符：`\` `;` `,` `"` `:` 前面补一个反斜杠，
/// 其余字符原样保留。纯函数，永不失败，空串进空串出。
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        match c {
            '\\' | ';' | ',' | '"' | ':' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// 还原转义：反斜杠后的字符按字面收下。
/// 串尾孤立的反斜杠原样保留，保证函数对任意输入都有结果。
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
