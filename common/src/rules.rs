//! 检测规则
//!
//! 每个选中列对应一条自由文本规则。规则只在本次会话内有效。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 列选择 + 列规则
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// 选中列（保持选择顺序）
    columns: Vec<String>,
    rules: BTreeMap<String, String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 选中列并设置规则（重复选择时覆盖规则）
    pub fn set(&mut self, column: impl Into<String>, rule: impl Into<String>) {
        let column = column.into();
        if !self.columns.contains(&column) {
            self.columns.push(column.clone());
        }
        self.rules.insert(column, rule.into());
    }

    /// 只选中列，不设置规则
    pub fn select(&mut self, column: impl Into<String>) {
        let column = column.into();
        if !self.columns.contains(&column) {
            self.columns.push(column);
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rule(&self, column: &str) -> Option<&str> {
        self.rules.get(column).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// 缺少规则（未设置或为空白）的列
    pub fn missing_rules(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| self.rule(c).map(|r| r.trim().is_empty()).unwrap_or(true))
            .cloned()
            .collect()
    }

    /// `列名=规则` 形式解析
    pub fn parse_assignment(s: &str) -> Result<(String, String)> {
        let (column, rule) = s
            .split_once('=')
            .ok_or_else(|| Error::Parse(format!("规则格式应为 列名=规则: {}", s)))?;
        let column = column.trim();
        if column.is_empty() {
            return Err(Error::Parse(format!("列名为空: {}", s)));
        }
        Ok((column.to_string(), rule.trim().to_string()))
    }

    /// `列名=规则` 列表构造
    pub fn from_assignments<S: AsRef<str>>(items: &[S]) -> Result<Self> {
        let mut set = Self::new();
        for item in items {
            let (column, rule) = Self::parse_assignment(item.as_ref())?;
            set.set(column, rule);
        }
        Ok(set)
    }

    /// JSON 构造
    ///
    /// 支持对象 `{"列名": "规则"}` 与数组 `[{"column": .., "rule": ..}]` 两种形式；
    /// 对象形式按键名排序，需要保持顺序时使用数组形式。
    pub fn from_json(json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct Entry {
            column: String,
            #[serde(default)]
            rule: String,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RulesJson {
            List(Vec<Entry>),
            Map(BTreeMap<String, String>),
        }

        let parsed: RulesJson = serde_json::from_str(json)
            .map_err(|e| Error::Parse(format!("规则 JSON 解析错误: {}", e)))?;

        let mut set = Self::new();
        match parsed {
            RulesJson::List(entries) => {
                for e in entries {
                    set.set(e.column, e.rule);
                }
            }
            RulesJson::Map(map) => {
                for (column, rule) in map {
                    set.set(column, rule);
                }
            }
        }
        Ok(set)
    }

    /// (列名, 规则) 迭代（仅含已设置规则的列）
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .filter_map(|c| self.rule(c).map(|r| (c.as_str(), r)))
    }
}
