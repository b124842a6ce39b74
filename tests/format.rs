use analysis_format::{
    Block, CalloutKind, Config, Formatter, List, ListItem, SpecialHeading, Span, format_analysis,
    parse, plain_text,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use regex::Regex;

fn text(s: &str) -> Vec<Span> {
    vec![Span::Text(s.to_string())]
}

/// Visible text of rendered HTML, tags removed.
fn visible(html: &str) -> String {
    let tags = Regex::new(r"<[^>]+>").unwrap();
    tags.replace_all(html, "").into_owned()
}

#[test]
fn heading_list_paragraph_scenario() {
    assert_eq!(
        parse("# Title\n- a\n- b\nplain"),
        vec![
            Block::Heading {
                level: 1,
                content: text("Title"),
            },
            Block::List(List {
                items: vec![ListItem { content: text("a") }, ListItem { content: text("b") }],
            }),
            Block::Paragraph {
                content: text("plain"),
            },
        ]
    );
    assert_eq!(
        format_analysis("# Title\n- a\n- b\nplain"),
        "<h2 class=\"primary-title\">Title</h2>\n<ul><li>a</li><li>b</li></ul>\n<p>plain</p>\n"
    );
}

#[test]
fn table_scenario() {
    assert_eq!(
        parse("H1|H2\n---|---\nv1|v2"),
        vec![Block::Table {
            headers: Some(vec![text("H1"), text("H2")]),
            rows: vec![vec![text("v1"), text("v2")]],
        }]
    );
}

#[test]
fn callout_scenario() {
    let blocks = parse("优势：近市中心，交通便利");
    assert_eq!(
        blocks,
        vec![Block::Callout {
            kind: CalloutKind::Advantages,
            label: "优势：".to_string(),
            items: vec![text("近市中心"), text("交通便利")],
        }]
    );
}

#[test]
fn empty_input_scenario() {
    let formatter = Formatter::default();
    assert_eq!(formatter.format(""), "<p>暂无分析内容</p>\n");
    assert_eq!(formatter.format_opt(None), "<p>暂无分析内容</p>\n");
    assert_eq!(formatter.format(" \n\t\n"), "<p>暂无分析内容</p>\n");
}

#[test]
fn custom_placeholder() {
    let mut config = Config::default();
    config.render.placeholder = "No analysis".to_string();
    let formatter = Formatter::new(&config).unwrap();
    assert_eq!(formatter.format(""), "<p>No analysis</p>\n");
}

#[test]
fn full_report() {
    let report = indoc! {"
        # Point Cook 区域分析

        ## 1. 人口结构
        该区域以年轻家庭为主。
        - 平均年龄 32 岁
        - 家庭户占比高

        ## 2. 房价
        | 类型 | 中位价 |
        |------|--------|
        | 独立屋 | 75万 |
        | 联排 | 58万 |

        a. 学校资源充足
        b. 购物方便

        优势：近市中心，交通便利
        劣势：通勤时间长，配套不足
    "};

    let blocks = parse(report);
    let kinds: Vec<&str> = blocks
        .iter()
        .map(|block| match block {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::List(_) => "list",
            Block::Table { .. } => "table",
            Block::Callout { .. } => "callout",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "heading",
            "heading",
            "paragraph",
            "list",
            "heading",
            "table",
            "list",
            "callout",
            "callout",
        ]
    );

    match &blocks[5] {
        Block::Table { headers, rows } => {
            assert_eq!(headers.as_ref().map(Vec::len), Some(2));
            assert_eq!(rows.len(), 2);
            assert_eq!(plain_text(&rows[1][0]), "联排");
        }
        other => panic!("expected table, got {other:?}"),
    }

    let html = format_analysis(report);
    assert_eq!(html.matches("<ul>").count(), html.matches("</ul>").count());
    assert_eq!(html.matches("<table").count(), 1);
    assert!(html.contains("<div class=\"disadvantages\"><h4>劣势：</h4><ul><li>通勤时间长</li><li>配套不足</li></ul></div>"));
}

#[test]
fn numbered_and_special_headings_from_toml() {
    let config = Config::from_toml(
        indoc! {r#"
            [headings]
            markdown = false
            numbered = true

            [[headings.special]]
            text = "总结"
            level = 1

            [callouts]
            delimiters = ["，", ","]
        "#},
        std::path::Path::new("test.toml"),
    )
    .unwrap();
    assert_eq!(
        config.headings.special,
        vec![SpecialHeading {
            text: "总结".to_string(),
            level: 1
        }]
    );

    let formatter = Formatter::new(&config).unwrap();
    let blocks = formatter.parse("1. 概况\n1.1 人口\n# 不是标题\n总结\n优势：安静,绿化好");
    assert_eq!(
        blocks,
        vec![
            Block::Heading {
                level: 1,
                content: text("概况"),
            },
            Block::Heading {
                level: 2,
                content: text("人口"),
            },
            Block::Paragraph {
                content: text("# 不是标题"),
            },
            Block::Heading {
                level: 1,
                content: text("总结"),
            },
            Block::Callout {
                kind: CalloutKind::Advantages,
                label: "优势：".to_string(),
                items: vec![text("安静"), text("绿化好")],
            },
        ]
    );
}

#[test]
fn blocks_serialize_to_tagged_json() {
    let json = serde_json::to_value(parse("# T\n- a")).unwrap();
    assert_eq!(json[0]["kind"], "heading");
    assert_eq!(json[0]["level"], 1);
    assert_eq!(json[1]["kind"], "list");
    assert_eq!(json[1]["items"][0]["content"][0]["text"], "a");

    let json = serde_json::to_value(parse("劣势：房价高")).unwrap();
    assert_eq!(json[0]["kind"], "callout");
    assert_eq!(json[0]["callout"], "disadvantages");
    assert_eq!(json[0]["label"], "劣势：");
    assert_eq!(json[0]["items"][0][0]["text"], "房价高");
}

#[derive(Debug, Clone)]
enum Shape {
    H1(String),
    H2(String),
    Item(String),
    Row(String, String),
    Separator,
    Para(String, String),
    Advantages(String, String),
}

impl Shape {
    fn line(&self) -> String {
        match self {
            Shape::H1(w) => format!("# {w}"),
            Shape::H2(w) => format!("## {w}"),
            Shape::Item(w) => format!("- {w}"),
            Shape::Row(a, b) => format!("{a} | {b}"),
            Shape::Separator => "---|---".to_string(),
            Shape::Para(a, b) => format!("{a} {b}"),
            Shape::Advantages(a, b) => format!("优势：{a}，{b}"),
        }
    }

    fn words(&self) -> Vec<&str> {
        match self {
            Shape::Separator => vec![],
            Shape::H1(w) | Shape::H2(w) | Shape::Item(w) => vec![w.as_str()],
            Shape::Row(a, b) | Shape::Para(a, b) | Shape::Advantages(a, b) => {
                vec![a.as_str(), b.as_str()]
            }
        }
    }
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{2,8}"
}

fn shape() -> impl Strategy<Value = Shape> {
    prop_oneof![
        word().prop_map(Shape::H1),
        word().prop_map(Shape::H2),
        word().prop_map(Shape::Item),
        (word(), word()).prop_map(|(a, b)| Shape::Row(a, b)),
        Just(Shape::Separator),
        (word(), word()).prop_map(|(a, b)| Shape::Para(a, b)),
        (word(), word()).prop_map(|(a, b)| Shape::Advantages(a, b)),
    ]
}

proptest! {
    #[test]
    fn visible_text_survives_formatting(shapes in prop::collection::vec(shape(), 1..20)) {
        let input: Vec<String> = shapes.iter().map(Shape::line).collect();
        let html = format_analysis(&input.join("\n"));
        prop_assert!(!html.is_empty());

        // Words appear in the same order they were written
        let visible = visible(&html);
        let mut pos = 0;
        for word in shapes.iter().flat_map(Shape::words) {
            let found = visible[pos..].find(word);
            prop_assert!(found.is_some(), "{word} missing from {visible}");
            pos += found.unwrap_or_default() + word.len();
        }

        prop_assert_eq!(html.matches("<ul>").count(), html.matches("</ul>").count());
        prop_assert_eq!(html.matches("<table").count(), html.matches("</table>").count());
        prop_assert!(!html.contains("<ul><ul>"));
    }

    #[test]
    fn adjacent_items_share_one_list(words in prop::collection::vec(word(), 1..10)) {
        let input: Vec<String> = words.iter().map(|w| format!("- {w}")).collect();
        let blocks = parse(&input.join("\n"));
        prop_assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::List(list) => {
                prop_assert_eq!(list.items.len(), words.len());
            }
            other => {
                prop_assert!(false, "expected list, got {:?}", other);
            }
        }
    }
}
