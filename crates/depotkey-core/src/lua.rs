//! Generation of the Lua unlock script from extracted depot keys.

use crate::types::{AppId, DepotKey};

/// Render the output script: a header line for the app itself, then one
/// line per depot key, in extraction order.
///
/// # Example
///
/// ```
/// use depotkey_core::lua::lua_script;
/// use depotkey_core::{AppId, DepotKey};
///
/// let appid: AppId = "730".parse().unwrap();
/// let keys = vec![DepotKey { depot_id: "731".into(), key: "ab12".into() }];
/// assert_eq!(lua_script(&appid, &keys), "addappid(730)\naddappid(731,1,\"ab12\")");
/// ```
pub fn lua_script(appid: &AppId, keys: &[DepotKey]) -> String {
    let mut lines = Vec::with_capacity(keys.len() + 1);
    lines.push(format!("addappid({appid})"));
    for dk in keys {
        lines.push(format!("addappid({},1,\"{}\")", dk.depot_id, dk.key));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vdf::extract_depot_keys;

    #[test]
    fn header_only_when_no_keys() {
        let appid: AppId = "440".parse().unwrap();
        assert_eq!(lua_script(&appid, &[]), "addappid(440)");
    }

    #[test]
    fn one_line_per_key_in_order() {
        let appid: AppId = "10".parse().unwrap();
        let keys = vec![
            DepotKey {
                depot_id: "11".into(),
                key: "aa".into(),
            },
            DepotKey {
                depot_id: "12".into(),
                key: "bb".into(),
            },
        ];
        let script = lua_script(&appid, &keys);
        assert_eq!(
            script.lines().collect::<Vec<_>>(),
            ["addappid(10)", "addappid(11,1,\"aa\")", "addappid(12,1,\"bb\")"]
        );
    }

    #[test]
    fn extraction_to_codegen_round_trip() {
        let payload = r#"
            "depots"
            {
                "101" { "DecryptionKey" "c1" }
                "102" { "DecryptionKey" "c2" }
                "103" { "DecryptionKey" "000000" }
            }
        "#;
        let keys = extract_depot_keys(payload.as_bytes());
        let appid: AppId = "100".parse().unwrap();
        let script = lua_script(&appid, &keys);

        // k non-placeholder keys produce k+1 lines.
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(lines.len(), keys.len() + 1);
        assert_eq!(lines[0], "addappid(100)");
        assert_eq!(lines[1], "addappid(101,1,\"c1\")");
        assert_eq!(lines[2], "addappid(102,1,\"c2\")");
    }
}
