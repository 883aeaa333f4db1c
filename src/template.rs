//! テンプレート置換
//!
//! `{{name}}` 形式のプレースホルダをコンテキスト値へ置き換える。
//! 置換は 1 パスで行い、置換後の値を再走査しない。
//! シェルエスケープも URL エンコードも行わない（生のまま渡す方針で、
//! 引用はテンプレートの書き手の責任）

/// テンプレート中のプレースホルダを置換する
///
/// * 大文字小文字を区別する逐語一致、全出現を置換
/// * 既知でない `{{...}}` トークンはそのまま残す
/// * 置換値にプレースホルダ文字列が含まれていても展開されない
pub fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let token_start = &rest[start..];

        let replaced = token_start.find("}}").and_then(|end| {
            let name = &token_start[2..end];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (end + 2, *value))
        });

        match replaced {
            Some((token_len, value)) => {
                output.push_str(value);
                rest = &token_start[token_len..];
            }
            None => {
                // 閉じ括弧なし/未知トークン: `{{` だけ出力して走査を続ける
                output.push_str("{{");
                rest = &token_start[2..];
            }
        }
    }

    output.push_str(rest);
    output
}
