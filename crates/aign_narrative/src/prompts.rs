//! Role prompts and section labels.
//!
//! Labels double as the `# heading` names agents read and write, so they are
//! shared between prompt construction and reply parsing.

/// Input label: outline to expand.
pub const OUTLINE: &str = "大纲";
/// Output label: expanded outline.
pub const EXPANDED_OUTLINE: &str = "扩展大纲";
/// Input label: chapter outline.
pub const CHAPTER_OUTLINE: &str = "章节大纲";
/// Input label: paragraph outline.
pub const PARAGRAPH_OUTLINE: &str = "段落大纲";
/// Input label: narrative memory context.
pub const PRIOR_MEMORY: &str = "前文记忆";
/// Output label: written paragraph.
pub const PARAGRAPH: &str = "段落";
/// Input label: text to embellish.
pub const TO_EMBELLISH: &str = "要润色的内容";
/// Input label: embellishment request.
pub const EMBELLISH_REQUEST: &str = "润色要求";
/// Output label: embellished text.
pub const EMBELLISHED: &str = "润色结果";
/// Input label: passage for entity extraction.
pub const PASSAGE: &str = "文本";
/// Output label: extracted characters and relationships.
pub const CHARACTERS_AND_RELATIONSHIPS: &str = "人物状态和关系";
/// Input label: newly written passage for summarisation.
pub const NEW_PARAGRAPH: &str = "新段落";
/// Output label: plot summary.
pub const PLOT_SUMMARY: &str = "剧情总结";

/// Outline expansion agent.
pub const OUTLINE_EXPANDER: &str = "你是一名小说策划。请把输入的大纲扩展为更详细、层次分明的大纲。\n\
输出格式：\n# 扩展大纲\n扩展后的大纲内容";

/// Paragraph writer agent.
pub const WRITER: &str = "请根据以下章节大纲和段落大纲扩展成完整的段落，并与前文记忆保持一致。\n\
输出格式：\n# 段落\n段落正文";

/// Embellishment agent.
pub const EMBELLISHER: &str = "请润色以下内容，使其更生动形象，并遵循润色要求。\n\
输出格式：\n# 润色结果\n润色后的正文";

/// Entity extraction agent.
pub const ENTITY_EXTRACTOR: &str = "请从以下文本中提取人物的状态和关系，并以JSON格式返回。\n\
输出格式：\n# 人物状态和关系\n\
{\"characters\": {\"角色A\": \"状态描述\"}, \"relationships\": [{\"characters\": [\"角色A\", \"角色B\"], \"relation\": \"关系描述\"}]}";

/// Plot summary agent.
pub const SUMMARIZER: &str = "请结合前文记忆，用简洁的语言总结新段落中的剧情发展。\n\
输出格式：\n# 剧情总结\n总结内容";
