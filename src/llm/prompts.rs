// System prompts and the text rendering of a fortune report

use crate::fortune::{FortuneReport, PersonProfile};

pub struct SystemPrompts;

impl SystemPrompts {
    /// Persona for the compatibility reading.
    pub fn fortune_master() -> &'static str {
        "你是一位精通中國傳統命理的老師，熟悉八字、紫微斗數、易經占卜與生肖配對。
請根據使用者提供的兩位緣主資料，進行姻緣配對分析。

分析要求：
1. 語氣溫暖而專業，像當面談話一樣自然
2. 不要使用表格或 markdown 格式，內容會被朗讀出來
3. 使用繁體中文回覆
4. 內容涵蓋八字合婚、紫微斗數、易經卦象、生肖配對，最後給出綜合建議
5. 若資料註明兩人已斷聯，請分析復合的機會、時機與做法
6. 全文約 300 到 500 字，適合朗讀"
    }

    /// Persona for the free-form voice chat.
    pub fn voice_chat() -> &'static str {
        "你是一個友善、樂於助人的語音對話助手。使用者透過語音和你交談，因此：
1. 回覆簡潔自然，適合朗讀
2. 避免長段落、表格和 markdown 格式
3. 使用口語化的說法
4. 每次回覆大約兩到四句話"
    }
}

/// Collects labeled sections of a user message.
pub struct PromptBuilder {
    parts: Vec<String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    pub fn add_line(mut self, line: impl Into<String>) -> Self {
        self.parts.push(line.into());
        self
    }

    /// A `【title】` section; the first line follows the title directly.
    pub fn add_section(mut self, title: &str, lines: &[String]) -> Self {
        let mut section = format!("【{}】", title);
        let mut lines = lines.iter();
        if let Some(first) = lines.next() {
            section.push_str(first);
        }
        for line in lines {
            section.push('\n');
            section.push_str(line);
        }
        self.parts.push(section);
        self
    }

    pub fn build(self) -> String {
        self.parts.join("\n\n")
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct FortunePrompt;

impl FortunePrompt {
    /// Render a report as the labeled-field user message of a reading.
    pub fn render(report: &FortuneReport) -> String {
        let compat = &report.compatibility;
        let hexagram = &report.hexagram.hexagram;

        let mut builder = PromptBuilder::new()
            .add_line("請分析以下兩位緣主的姻緣配對：")
            .add_section("甲方", &Self::person_lines(&report.person_a))
            .add_section("乙方", &Self::person_lines(&report.person_b))
            .add_section(
                "配對",
                &[
                    format!(
                        "生肖：{}，五行：{}",
                        compat.zodiac_tier, compat.element_relation
                    ),
                    format!(
                        "易經：{}卦（{}），姻緣指數：{}分",
                        hexagram.name, hexagram.maxim, report.overall_score
                    ),
                ],
            );

        if !report.still_in_contact {
            builder = builder.add_section(
                "特別分析",
                &["兩人已斷聯，請分析復合機會及建議時機和做法。".to_string()],
            );
        }

        builder.build()
    }

    fn person_lines(person: &PersonProfile) -> Vec<String> {
        let record = &person.record;
        let elements = person
            .pillars
            .element_histogram
            .iter()
            .map(|(element, count)| format!("{}{}", element, count))
            .collect::<Vec<_>>()
            .join(" ");

        vec![
            format!("{}（{}）", record.name, record.gender),
            format!("生日：{}，{}", person.birthday, person.hour_label),
            format!(
                "八字：{}，日主：{}，納音：{}",
                person.bazi, person.pillars.day_stem, person.nayin
            ),
            format!("生肖：{}", person.zodiac),
            format!("五行：{}", elements),
            format!("紫微主星：{}，命宮：{}", person.major_star, person.palace),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompts() {
        assert!(SystemPrompts::fortune_master().contains("繁體中文"));
        assert!(SystemPrompts::voice_chat().contains("語音"));
    }

    #[test]
    fn test_prompt_builder_sections() {
        let prompt = PromptBuilder::new()
            .add_line("intro")
            .add_section("甲方", &["first".to_string(), "second".to_string()])
            .add_section("empty", &[])
            .build();

        assert_eq!(prompt, "intro\n\n【甲方】first\nsecond\n\n【empty】");
    }
}
