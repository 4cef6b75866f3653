//! Embed code generation.
//!
//! [`generate`] turns a [`WidgetConfiguration`] into a self-contained
//! `<script>` block that tenants paste into their own site. The snippet has
//! no external dependencies: it injects its own stylesheet, builds the
//! launcher button and the chat panel, and points an iframe at the tenant's
//! chat URL the first time the panel opens.
//!
//! Output is a pure function of the inputs. Identical configuration and
//! location always give byte-identical text.

use std::fmt::Write;

use crate::config::WidgetConfiguration;
use crate::icons::icon_markup;
use crate::location::{resolve_chat_url, PageLocation};

pub fn generate(config: &WidgetConfiguration, location: &PageLocation) -> String {
    let config = config.clamped();
    let chat_url = resolve_chat_url(&config, location);

    let mut code = String::with_capacity(6 * 1024);
    code.push_str("<!-- AI Bot Widget - Вставьте этот код перед закрывающим тегом </body> -->\n");
    code.push_str("<script>\n(function() {\n");
    code.push_str(
        "    var widget = document.createElement('div');\n    \
         widget.id = 'ai-bot-widget-container';\n    \
         document.body.appendChild(widget);\n\n",
    );

    code.push_str("    var style = document.createElement('style');\n    style.textContent = `\n");
    code.push_str(&stylesheet(&config));
    code.push_str("    `;\n    document.head.appendChild(style);\n\n");

    code.push_str("    widget.innerHTML = `\n");
    code.push_str(&markup(&config));
    code.push_str("    `;\n\n");

    let _ = writeln!(code, "    var CHAT_URL = '{}';", escape_js_string(&chat_url));
    code.push_str(BEHAVIOUR);
    code.push_str("})();\n</script>");
    code
}

fn stylesheet(config: &WidgetConfiguration) -> String {
    let side = config.button_position.side();
    let size = config.button_size;
    let icon_size = f64::from(size) * 0.45;
    let panel_bottom = size + 20;
    let custom_css = config
        .custom_css
        .as_deref()
        .map(escape_template_literal)
        .unwrap_or_default();

    format!(
        r#"        #ai-bot-widget-container {{ position: fixed; bottom: 20px; {side}: 20px; z-index: 999999; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; }}
        #ai-bot-button {{ width: {size}px; height: {size}px; border-radius: 50%; background: linear-gradient(135deg, {button_start} 0%, {button_end} 100%); border: none; cursor: pointer; box-shadow: 0 4px 12px rgba(0,0,0,0.15); display: flex; align-items: center; justify-content: center; transition: transform 0.3s ease; }}
        #ai-bot-button:hover {{ transform: scale(1.05); box-shadow: 0 6px 20px rgba(0,0,0,0.2); }}
        #ai-bot-button svg {{ width: {icon_size}px; height: {icon_size}px; color: white; }}
        #ai-bot-chat {{ position: absolute; bottom: {panel_bottom}px; {side}: 0; width: {width}px; height: {height}px; max-height: calc(100vh - 120px); background: white; border-radius: {radius}px; box-shadow: 0 8px 32px rgba(0,0,0,0.12); display: none; flex-direction: column; overflow: hidden; animation: slideUp 0.3s ease; }}
        #ai-bot-chat.open {{ display: flex; }}
        @keyframes slideUp {{ from {{ opacity: 0; transform: translateY(20px); }} to {{ opacity: 1; transform: translateY(0); }} }}
        #ai-bot-header {{ background: linear-gradient(135deg, {header_start} 0%, {header_end} 100%); color: white; padding: 16px 20px; display: flex; justify-content: space-between; align-items: center; }}
        #ai-bot-header h3 {{ margin: 0; font-size: 18px; font-weight: 600; }}
        #ai-bot-close {{ background: none; border: none; color: white; cursor: pointer; padding: 4px; display: flex; }}
        #ai-bot-close:hover {{ opacity: 0.8; }}
        #ai-bot-iframe {{ flex: 1; border: none; width: 100%; height: 100%; }}
        {custom_css}
        @media (max-width: 480px) {{
            #ai-bot-widget-container {{ bottom: 10px; {side}: 10px; }}
            #ai-bot-chat {{ width: calc(100vw - 20px); height: calc(100vh - 100px); bottom: {panel_bottom}px; {side}: -5px; }}
        }}
"#,
        button_start = escape_template_literal(&config.button_color),
        button_end = escape_template_literal(&config.button_color_end),
        header_start = escape_template_literal(&config.header_color),
        header_end = escape_template_literal(&config.header_color_end),
        width = config.window_width,
        height = config.window_height,
        radius = config.border_radius,
    )
}

fn markup(config: &WidgetConfiguration) -> String {
    format!(
        r#"        <button id="ai-bot-button" aria-label="Открыть чат">
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
                {icon}
            </svg>
        </button>
        <div id="ai-bot-chat">
            <div id="ai-bot-header">
                <h3>{title}</h3>
                <button id="ai-bot-close" aria-label="Закрыть чат">
                    <svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
                        <line x1="18" y1="6" x2="6" y2="18"></line>
                        <line x1="6" y1="6" x2="18" y2="18"></line>
                    </svg>
                </button>
            </div>
            <iframe id="ai-bot-iframe" src="" title="AI Bot Chat"></iframe>
        </div>
"#,
        icon = icon_markup(&config.button_icon),
        title = escape_template_literal(&escape_html(&config.header_title)),
    )
}

// The iframe gets its src on first open only.
const BEHAVIOUR: &str = r#"    var button = document.getElementById('ai-bot-button');
    var chat = document.getElementById('ai-bot-chat');
    var closeBtn = document.getElementById('ai-bot-close');
    var iframe = document.getElementById('ai-bot-iframe');
    var isOpen = false;

    function toggleChat() {
        isOpen = !isOpen;
        if (isOpen) {
            chat.classList.add('open');
            if (!iframe.getAttribute('src')) iframe.src = CHAT_URL;
        } else {
            chat.classList.remove('open');
        }
    }

    button.addEventListener('click', toggleChat);
    closeBtn.addEventListener('click', toggleChat);
    document.addEventListener('keydown', function(e) {
        if (e.key === 'Escape' && isOpen) toggleChat();
    });
"#;

/// Encodes text for a JS template literal inside an inline `<script>`. The
/// literal evaluates back to exactly `input`.
fn escape_template_literal(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
        .replace("</", "<\\/")
}

fn escape_js_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\x3C"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ButtonPosition;
    use crate::icons::DEFAULT_ICON;

    fn admin_page() -> PageLocation {
        PageLocation::parse("https://admin.acme.com/dashboard").unwrap()
    }

    fn style_block(code: &str) -> &str {
        let start = code.find("style.textContent = `").unwrap();
        let end = code[start..].find("`;").unwrap();
        &code[start..start + end]
    }

    fn mobile_block(code: &str) -> &str {
        let start = code.find("@media (max-width: 480px)").unwrap();
        &code[start..]
    }

    #[test]
    fn test_generate_is_deterministic() {
        let config = WidgetConfiguration {
            custom_css: Some("#ai-bot-button { outline: 1px solid red; }".to_string()),
            ..Default::default()
        };
        let location = admin_page();

        assert_eq!(generate(&config, &location), generate(&config, &location));
    }

    #[test]
    fn test_right_position_is_consistent() {
        let code = generate(&WidgetConfiguration::default(), &admin_page());
        let style = style_block(&code);

        assert!(style.contains("#ai-bot-widget-container { position: fixed; bottom: 20px; right: 20px;"));
        assert!(style.contains("bottom: 80px; right: 0;"));
        assert!(mobile_block(style).contains("bottom: 10px; right: 10px;"));
        assert!(mobile_block(style).contains("right: -5px;"));
        assert!(!style.contains("left:"));
    }

    #[test]
    fn test_left_position_is_consistent() {
        let config = WidgetConfiguration {
            button_position: ButtonPosition::BottomLeft,
            ..Default::default()
        };
        let code = generate(&config, &admin_page());
        let style = style_block(&code);

        assert!(style.contains("#ai-bot-widget-container { position: fixed; bottom: 20px; left: 20px;"));
        assert!(style.contains("bottom: 80px; left: 0;"));
        assert!(mobile_block(style).contains("bottom: 10px; left: 10px;"));
        assert!(mobile_block(style).contains("left: -5px;"));
        assert!(!style.contains("right:"));
    }

    #[test]
    fn test_numeric_fields_reach_stylesheet() {
        let config = WidgetConfiguration {
            button_size: 50,
            window_width: 420,
            window_height: 700,
            border_radius: 8,
            ..Default::default()
        };
        let code = generate(&config, &admin_page());

        assert!(code.contains("#ai-bot-button { width: 50px; height: 50px;"));
        assert!(code.contains("#ai-bot-button svg { width: 22.5px; height: 22.5px;"));
        assert!(code.contains("width: 420px; height: 700px;"));
        assert!(code.contains("border-radius: 8px;"));
        assert!(code.contains("bottom: 70px;"));
        assert!(code.contains("linear-gradient(135deg, #3b82f6 0%, #1d4ed8 100%)"));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let config = WidgetConfiguration {
            button_size: 500,
            window_width: 10,
            ..Default::default()
        };
        let code = generate(&config, &admin_page());

        assert!(code.contains("#ai-bot-button { width: 80px; height: 80px;"));
        assert!(code.contains("width: 300px;"));
        assert!(!code.contains("500px"));
    }

    #[test]
    fn test_chat_url_inferred_from_admin_host() {
        let code = generate(&WidgetConfiguration::default(), &admin_page());
        assert!(code.contains("var CHAT_URL = 'https://acme.com';"));
    }

    #[test]
    fn test_chat_url_uses_origin_without_admin_prefix() {
        let location = PageLocation::parse("https://acme.com/settings").unwrap();
        let code = generate(&WidgetConfiguration::default(), &location);
        assert!(code.contains("var CHAT_URL = 'https://acme.com';"));
    }

    #[test]
    fn test_explicit_chat_url_wins() {
        let config = WidgetConfiguration {
            chat_url: Some("https://custom.example".to_string()),
            ..Default::default()
        };
        let code = generate(&config, &admin_page());
        assert!(code.contains("var CHAT_URL = 'https://custom.example';"));
    }

    #[test]
    fn test_chat_url_cannot_break_out_of_string() {
        let config = WidgetConfiguration {
            chat_url: Some("https://x.example/?q=';alert(1)//</script>".to_string()),
            ..Default::default()
        };
        let code = generate(&config, &admin_page());
        assert!(code.contains(r"var CHAT_URL = 'https://x.example/?q=\';alert(1)//\x3C/script>';"));
        assert_eq!(code.matches("</script>").count(), 1);
    }

    #[test]
    fn test_unknown_icon_uses_default_markup() {
        let config = WidgetConfiguration {
            button_icon: "NotARealIcon".to_string(),
            ..Default::default()
        };
        let code = generate(&config, &admin_page());
        assert!(code.contains(icon_markup(DEFAULT_ICON)));
    }

    #[test]
    fn test_custom_css_is_emitted_verbatim() {
        let marker = ".zz-marker-7f3a > .tile:hover { color: #abcdef !important; }";
        let config = WidgetConfiguration {
            custom_css: Some(marker.to_string()),
            ..Default::default()
        };
        let code = generate(&config, &admin_page());
        let style = style_block(&code);

        let css_at = style.find(marker).expect("custom css present");
        assert!(css_at < style.find("@media (max-width: 480px)").unwrap());
    }

    #[test]
    fn test_custom_css_keeps_literal_intact() {
        let config = WidgetConfiguration {
            custom_css: Some(".a::before { content: \"`${x}`\"; } </style>".to_string()),
            ..Default::default()
        };
        let code = generate(&config, &admin_page());
        assert!(code.contains(r#".a::before { content: "\`\${x}\`"; } <\/style>"#));
    }

    #[test]
    fn test_custom_css_escape_sequences_survive_literal() {
        let config = WidgetConfiguration {
            custom_css: Some(r#".sep::after { content: "\2014"; }"#.to_string()),
            ..Default::default()
        };
        let code = generate(&config, &admin_page());

        // Backslashes are doubled in the source text so the template literal
        // evaluates to the operator's CSS exactly.
        assert!(code.contains(r#".sep::after { content: "\\2014"; }"#));
        assert!(!code.contains(r#"content: "\2014""#));
    }

    #[test]
    fn test_header_title_is_escaped() {
        let config = WidgetConfiguration {
            header_title: "<b>Hi</b> & welcome".to_string(),
            ..Default::default()
        };
        let code = generate(&config, &admin_page());
        assert!(code.contains("<h3>&lt;b&gt;Hi&lt;/b&gt; &amp; welcome</h3>"));
    }

    #[test]
    fn test_lazy_iframe_and_escape_handler() {
        let code = generate(&WidgetConfiguration::default(), &admin_page());
        assert!(code.contains(r#"<iframe id="ai-bot-iframe" src="" title="AI Bot Chat"></iframe>"#));
        assert!(code.contains("if (!iframe.getAttribute('src')) iframe.src = CHAT_URL;"));
        assert!(code.contains("if (e.key === 'Escape' && isOpen) toggleChat();"));
        assert!(code.starts_with("<!-- AI Bot Widget"));
        assert!(code.ends_with("})();\n</script>"));
    }
}
