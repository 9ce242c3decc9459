mod test_utils;

use aign_error::AignErrorKind;
use aign_interface::ChatDriver;
use aign_narrative::{Aign, MemorySnapshot};
use aign_retry::{AignConfig, MemoryStrategy};
use std::sync::Arc;
use test_utils::{MockChatDriver, fast_config};

async fn orchestrator(driver: &Arc<MockChatDriver>, config: &AignConfig) -> Aign {
    let dyn_driver: Arc<dyn ChatDriver> = driver.clone();
    Aign::new(dyn_driver, config).await.expect("orchestrator builds")
}

fn entities(json: &str) -> String {
    format!("# 人物状态和关系\n{}", json)
}

#[tokio::test]
async fn test_construction_with_acknowledgements_makes_no_calls() {
    let driver = Arc::new(MockChatDriver::new_replies(Vec::<String>::new()));

    let aign = orchestrator(&driver, &fast_config(MemoryStrategy::EntityGraph)).await;

    assert_eq!(driver.call_count(), 0);
    assert!(aign.paragraphs().is_empty());
    assert_eq!(aign.writer().transcript().len(), 2);
}

#[tokio::test]
async fn test_entity_graph_keeps_latest_status() {
    let driver = Arc::new(MockChatDriver::new_replies([
        "# 段落\nAlice fell asleep under the oak.".to_string(),
        entities(r#"{"characters": {"Alice": "asleep"}}"#),
        "# 段落\nAlice woke and ran home.".to_string(),
        entities(
            r#"{"characters": {"Alice": "running home"}, "relationships": [{"characters": ["Bob", "Alice"], "relation": "neighbours"}]}"#,
        ),
    ]));
    let mut aign = orchestrator(&driver, &fast_config(MemoryStrategy::EntityGraph)).await;

    let first = aign
        .generate_paragraph("第一章", "Alice 睡着了")
        .await
        .expect("first paragraph");
    let second = aign
        .generate_paragraph("第一章", "Alice 醒来")
        .await
        .expect("second paragraph");

    assert_eq!(first, "Alice fell asleep under the oak.");
    assert_eq!(second, "Alice woke and ran home.");

    let summary = aign.memory_summary();
    assert_eq!(summary.matches("Alice:").count(), 1);
    assert!(summary.contains("Alice: running home"));
    assert!(!summary.contains("asleep"));
    assert!(summary.contains("Alice 和 Bob 的关系: neighbours"));

    let graph = aign.memory().as_entity_graph().expect("entity graph");
    assert_eq!(graph.character_status("Alice"), Some("running home"));
    assert_eq!(graph.relationship("Bob", "Alice"), Some("neighbours"));

    // the second writer call saw memory from the first paragraph
    assert!(driver.last_turn_of(2).contains("# 前文记忆\n当前人物状态：\nAlice: asleep"));
    // the extractor was given the paragraph text
    assert!(driver.last_turn_of(1).contains("# 文本\nAlice fell asleep under the oak."));

    assert_eq!(aign.paragraphs().len(), 2);
    assert_eq!(
        aign.novel_content(),
        "Alice fell asleep under the oak.\n\nAlice woke and ran home."
    );
}

#[tokio::test]
async fn test_invalid_extraction_is_resampled() {
    let driver = Arc::new(MockChatDriver::new_replies([
        "# 段落\nAlice sings.".to_string(),
        entities("{'characters': {'Alice': 'singing'}}"),
        entities(r#"{"characters": {"Alice": "singing"}}"#),
    ]));
    let mut aign = orchestrator(&driver, &fast_config(MemoryStrategy::EntityGraph)).await;

    aign.generate_paragraph("第一章", "唱歌")
        .await
        .expect("second extraction validates");

    assert_eq!(driver.call_count(), 3);
    let graph = aign.memory().as_entity_graph().expect("entity graph");
    assert_eq!(graph.character_status("Alice"), Some("singing"));
}

#[tokio::test]
async fn test_failed_memory_update_writes_nothing() {
    let driver = Arc::new(MockChatDriver::new_replies([
        "# 段落\nAlice sings.".to_string(),
        entities("not json"),
        entities(r#"{"characters": {"": "nameless"}}"#),
        entities(r#"{"relationships": [{"characters": ["Alice", "Alice"], "relation": "self"}]}"#),
    ]));
    let mut aign = orchestrator(&driver, &fast_config(MemoryStrategy::EntityGraph)).await;
    let before = aign.memory_snapshot();

    let err = aign
        .generate_paragraph("第一章", "唱歌")
        .await
        .expect_err("extractor never validates");

    assert!(matches!(err.kind(), AignErrorKind::ExhaustedRetries(_)));
    assert_eq!(driver.call_count(), 4);
    assert!(aign.paragraphs().is_empty());
    assert_eq!(aign.memory_snapshot(), before);
}

#[tokio::test]
async fn test_rolling_summary_window() {
    let mut replies = Vec::new();
    for i in 1..=5 {
        replies.push(format!("# 段落\n第{}段正文", i));
        replies.push(format!("# 剧情总结\n总结{}", i));
    }
    let driver = Arc::new(MockChatDriver::new_replies(replies));
    let mut config = fast_config(MemoryStrategy::RollingSummary);
    config.memory.premise = "龙藏在山村里。".to_string();
    let mut aign = orchestrator(&driver, &config).await;

    for i in 1..=5 {
        aign.generate_paragraph("第一章", &format!("第{}段", i))
            .await
            .expect("paragraph");
    }

    assert_eq!(aign.memory_summary(), "龙藏在山村里。\n总结3\n总结4\n总结5");
    let rolling = aign.memory().as_rolling_summary().expect("rolling memory");
    assert_eq!(rolling.summaries().len(), 5);

    // the summariser saw the previous window and the new paragraph
    let summariser_turn = driver.last_turn_of(3);
    assert!(summariser_turn.contains("# 前文记忆\n龙藏在山村里。\n总结1"));
    assert!(summariser_turn.contains("# 新段落\n第2段正文"));
}

#[tokio::test]
async fn test_expand_outline_leaves_memory_alone() {
    let driver = Arc::new(MockChatDriver::new_replies(["# 扩展大纲\n1. 出发\n2. 遇险\n3. 归来"]));
    let mut aign = orchestrator(&driver, &fast_config(MemoryStrategy::EntityGraph)).await;
    let before = aign.memory_snapshot();

    let expanded = aign.expand_outline("冒险故事").await.expect("expands");

    assert_eq!(expanded, "1. 出发\n2. 遇险\n3. 归来");
    assert_eq!(aign.memory_snapshot(), before);
    assert!(aign.paragraphs().is_empty());
    assert_eq!(driver.last_turn_of(0), "# 大纲\n冒险故事\n\n");
}

#[tokio::test]
async fn test_embellish_replaces_latest_paragraph() {
    let driver = Arc::new(MockChatDriver::new_replies([
        "# 段落\nAlice walked.".to_string(),
        entities(r#"{"characters": {"Alice": "walking"}}"#),
        "# 润色结果\nAlice strolled through golden fields.".to_string(),
        entities(r#"{"characters": {"Alice": "strolling"}}"#),
        "# 润色结果\nSomething unrelated, polished.".to_string(),
        entities(r#"{"characters": {"Carol": "polished"}}"#),
    ]));
    let mut aign = orchestrator(&driver, &fast_config(MemoryStrategy::EntityGraph)).await;

    let draft = aign.generate_paragraph("第一章", "散步").await.expect("draft");
    let embellished = aign
        .embellish_paragraph(&draft, "更有画面感")
        .await
        .expect("embellished");

    assert_eq!(embellished, "Alice strolled through golden fields.");
    assert_eq!(aign.paragraphs(), ["Alice strolled through golden fields."]);
    assert!(driver.last_turn_of(2).contains("# 润色要求\n更有画面感\n\n"));

    // text not in the manuscript is returned but not stored
    aign.embellish_paragraph("Something unrelated.", "")
        .await
        .expect("embellished");
    assert_eq!(aign.paragraphs(), ["Alice strolled through golden fields."]);

    let graph = aign.memory().as_entity_graph().expect("entity graph");
    assert_eq!(graph.character_status("Alice"), Some("strolling"));
    assert_eq!(graph.character_status("Carol"), Some("polished"));
}

#[tokio::test]
async fn test_expand_and_embellish_uses_standing_request() {
    let driver = Arc::new(MockChatDriver::new_replies([
        "# 段落\n草稿".to_string(),
        "# 润色结果\n定稿".to_string(),
        entities(r#"{"characters": {"主角": "出发"}}"#),
    ]));
    let mut aign = orchestrator(&driver, &fast_config(MemoryStrategy::EntityGraph)).await;
    aign.set_embellishment_idea("更生动");

    let text = aign
        .expand_and_embellish_paragraph("第一章", "出发")
        .await
        .expect("written and embellished");

    assert_eq!(text, "定稿");
    assert_eq!(aign.paragraphs(), ["定稿"]);
    assert_eq!(
        driver.last_turn_of(1),
        "# 要润色的内容\n草稿\n\n# 润色要求\n更生动\n\n"
    );
    assert!(driver.last_turn_of(2).contains("# 文本\n定稿"));
}

#[tokio::test]
async fn test_snapshot_of_other_strategy_rejected() {
    let driver = Arc::new(MockChatDriver::new_replies(Vec::<String>::new()));
    let mut aign = orchestrator(&driver, &fast_config(MemoryStrategy::EntityGraph)).await;
    let before = aign.memory_snapshot();

    let err = aign
        .load_memory_snapshot(MemorySnapshot::RollingSummary {
            premise: "p".into(),
            summaries: vec!["s".into()],
        })
        .expect_err("strategy mismatch");

    assert!(matches!(err.kind(), AignErrorKind::Snapshot(_)));
    assert_eq!(aign.memory_snapshot(), before);
}

#[tokio::test]
async fn test_reset_agent_memories() {
    let driver = Arc::new(MockChatDriver::new_replies([
        "# 段落\n一".to_string(),
        entities("{}"),
    ]));
    let mut config = fast_config(MemoryStrategy::EntityGraph);
    config.agents.writer.use_memory = true;
    let mut aign = orchestrator(&driver, &config).await;

    aign.generate_paragraph("第一章", "一").await.expect("paragraph");
    assert_eq!(aign.writer().transcript().len(), 4);

    aign.reset_agent_memories();
    assert_eq!(aign.writer().transcript().len(), 2);
}

#[tokio::test]
async fn test_failed_memory_update_rolls_back_writer_transcript() {
    let driver = Arc::new(MockChatDriver::new_replies([
        "# 段落\nA paragraph nobody accepted.".to_string(),
        entities("not json"),
        entities("not json"),
        entities("not json"),
    ]));
    let mut config = fast_config(MemoryStrategy::EntityGraph);
    config.agents.writer.use_memory = true;
    let mut aign = orchestrator(&driver, &config).await;
    let seed = aign.writer().transcript().clone();

    aign.generate_paragraph("第一章", "出发")
        .await
        .expect_err("extractor never validates");

    assert!(aign.paragraphs().is_empty());
    assert_eq!(aign.writer().transcript(), &seed);
    assert!(
        aign.writer()
            .transcript()
            .messages()
            .iter()
            .all(|m| !m.content().contains("nobody accepted"))
    );
}

#[tokio::test]
async fn test_failed_embellishment_rolls_back_embellisher_transcript() {
    let driver = Arc::new(MockChatDriver::new_replies([
        "# 润色结果\nPolished but never remembered.".to_string(),
        entities(r#"{"characters": {"": "nameless"}}"#),
        entities(r#"{"characters": {"": "nameless"}}"#),
        entities(r#"{"characters": {"": "nameless"}}"#),
    ]));
    let mut config = fast_config(MemoryStrategy::EntityGraph);
    config.agents.embellisher.use_memory = true;
    let mut aign = orchestrator(&driver, &config).await;

    aign.embellish_paragraph("Alice walked.", "")
        .await
        .expect_err("extractor never validates");

    assert_eq!(aign.embellisher().transcript().len(), 2);
}

#[tokio::test]
async fn test_successful_operation_keeps_transcript_growth() {
    let driver = Arc::new(MockChatDriver::new_replies([
        "# 段落\n一".to_string(),
        entities("{}"),
        "# 段落\n二".to_string(),
        entities("not json"),
        entities("not json"),
        entities("not json"),
    ]));
    let mut config = fast_config(MemoryStrategy::EntityGraph);
    config.agents.writer.use_memory = true;
    let mut aign = orchestrator(&driver, &config).await;

    aign.generate_paragraph("第一章", "一").await.expect("accepted");
    let after_first = aign.writer().transcript().clone();
    assert_eq!(after_first.len(), 4);

    aign.generate_paragraph("第一章", "二")
        .await
        .expect_err("second memory update fails");

    assert_eq!(aign.writer().transcript(), &after_first);
    assert_eq!(aign.paragraphs(), ["一"]);
}
