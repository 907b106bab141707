use std::{path::PathBuf, time::Duration};

/// Name of the generated index inside the article directory.
pub const INDEX_FILE_NAME: &str = "index.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub markdown_dir: PathBuf,

    /// Keyword string assigned when a file declares none.
    pub default_keywords: String,
    /// Category assigned when no taxonomy entry matches the filename.
    pub fallback_category: String,
    /// Ordered taxonomy: first category whose keyword list contains a
    /// substring of the lowercased filename wins.
    pub categories: Vec<(String, Vec<String>)>,

    pub excerpt_max_len: usize,
    pub git_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        let categories = [
            (
                "中标公告",
                &["zhongbiao", "gonggao", "gongshi", "中标公告", "中标公示", "公示", "公告"][..],
            ),
            (
                "政策解读",
                &["zhengce", "jiedu", "fagui", "政策", "解读", "法规", "法律", "条例"][..],
            ),
            (
                "招标流程",
                &["liucheng", "zhinan", "caozuo", "流程", "指南", "操作", "教程"][..],
            ),
            (
                "投标技巧",
                &["jiqiao", "zhuyi", "fangfa", "技巧", "注意", "方法", "策略"][..],
            ),
        ]
        .into_iter()
        .map(|(name, keywords)| {
            (
                name.to_string(),
                keywords.iter().map(|k| k.to_string()).collect(),
            )
        })
        .collect();

        Self {
            markdown_dir: PathBuf::from("markdown"),
            default_keywords: "招标代理,政府采购,工程招标,招投标服务,项目公告".to_string(),
            fallback_category: "其他".to_string(),
            categories,
            excerpt_max_len: 150,
            git_timeout: Duration::from_secs(5),
        }
    }
}
