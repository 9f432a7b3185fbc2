use std::collections::BTreeSet;
use std::io::Write;

use chrono::{NaiveDate, NaiveTime};
use tokio::io::AsyncBufRead;

use super::Console;
use crate::error::{AppError, AppResult};

const DATE_FORMAT: &str = "%d.%m.%Y";
const TIME_FORMAT: &str = "%H:%M";

/// 更新时输入该关键字表示清空
pub(super) const CLEAR_KEYWORD: &str = "clear";

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    async fn read_line(&mut self, label: &str) -> AppResult<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let line = self.lines.next_line().await?;
        if line.is_none() {
            self.closed = true;
        }
        Ok(line.map(|l| l.trim().to_string()))
    }

    /// 读取菜单选项，输入结束时返回 None
    pub(super) async fn choice(&mut self) -> AppResult<Option<String>> {
        self.read_line("Choose an option: ").await
    }

    pub(super) async fn ask(&mut self, label: &str) -> AppResult<String> {
        self.read_line(label)
            .await?
            .ok_or_else(|| AppError::Internal("input closed".into()))
    }

    /// 空输入返回 None
    pub(super) async fn ask_optional(&mut self, label: &str) -> AppResult<Option<String>> {
        let value = self.ask(label).await?;
        Ok(optional(&value))
    }

    pub(super) async fn ask_id(&mut self, label: &str) -> AppResult<i64> {
        let value = self.ask(label).await?;
        parse_id(&value)
    }

    pub(super) async fn ask_date(&mut self, label: &str) -> AppResult<Option<NaiveDate>> {
        let value = self.ask(label).await?;
        parse_date(&value)
    }

    pub(super) async fn ask_time(&mut self, label: &str) -> AppResult<Option<NaiveTime>> {
        let value = self.ask(label).await?;
        parse_time(&value)
    }
}

pub(super) fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub(super) fn parse_id(value: &str) -> AppResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::validation(format!("'{}' is not a valid ID", value.trim())))
}

pub(super) fn parse_date(value: &str) -> AppResult<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| AppError::validation(format!("Invalid date '{value}', expected dd.mm.yyyy")))
}

pub(super) fn parse_time(value: &str) -> AppResult<Option<NaiveTime>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map(Some)
        .map_err(|_| AppError::validation(format!("Invalid time '{value}', expected HH:MM")))
}

/// 逗号分隔的列表，忽略空项
pub(super) fn parse_list(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub(super) fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".into())
}

pub(super) fn format_time(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| "-".into())
}
