use super::*;

#[test]
fn test_default_config() {
    let config = EditorConfig::default();
    assert_eq!(config.tab_size, 4);
    assert!(config.use_soft_tabs);
    assert_eq!(config.tab_string(), "    ");
}

#[test]
fn test_hard_tabs_and_zero_width_soft_tabs() {
    let hard = EditorConfig {
        tab_size: 8,
        use_soft_tabs: false,
    };
    assert_eq!(hard.tab_string(), "\t");

    let zero = EditorConfig {
        tab_size: 0,
        use_soft_tabs: true,
    };
    assert_eq!(zero.tab_string(), " ");
}

#[test]
fn test_editor_config_accepts_snake_and_camel_case() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        editor: EditorConfig,
    }

    let snake_case = r#"{ "editor": { "tab_size": 2, "use_soft_tabs": false } }"#;
    let parsed: Wrapper = serde_json::from_str(snake_case).expect("parse settings snake_case");
    assert_eq!(parsed.editor.tab_size, 2);
    assert!(!parsed.editor.use_soft_tabs);

    let camel_case = r#"{ "editor": { "tabSize": 2 } }"#;
    let parsed: Wrapper = serde_json::from_str(camel_case).expect("parse settings camelCase");
    assert_eq!(parsed.editor.tab_size, 2);
    assert!(parsed.editor.use_soft_tabs);
}
