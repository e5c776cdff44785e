//! Presentation strings, English and Chinese.
//!
//! Placeholders are written `{name}` and filled by the helpers below.

use relmove_batch::SelectionSummary;
use relmove_core::prelude::*;

/// One language's worth of user-facing text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub title: &'static str,
    pub description: &'static str,
    pub related_select: &'static str,
    pub cascade: &'static str,
    pub file_name: &'static str,
    pub reference_info: &'static str,
    pub root_file: &'static str,
    pub referenced_by_one: &'static str,
    pub referenced_by_count: &'static str,
    pub stats: &'static str,
    pub on: &'static str,
    pub off: &'static str,
    pub help: &'static str,
    pub prompt: &'static str,
    pub unknown_command: &'static str,
    pub no_such_entry: &'static str,
    pub cancelled: &'static str,
    pub result: &'static str,
    pub error: &'static str,
    pub plan_header: &'static str,
    pub destination_exists: &'static str,
    pub no_folders: &'static str,
}

pub const EN: Messages = Messages {
    title: "Move files with their links",
    description: "These files are linked from {file}. Checked files move to {folder}.",
    related_select: "Related select",
    cascade: "Cascade",
    file_name: "File",
    reference_info: "References",
    root_file: "root",
    referenced_by_one: "referenced once",
    referenced_by_count: "referenced by {count} files",
    stats: "Total: {total}, Selected: {selected}, Needs confirmation: {needs_confirmation}",
    on: "on",
    off: "off",
    help: "<n> toggle, +<n>/-<n> check/uncheck, a all, n none, r related select, c cascade, y confirm, q cancel",
    prompt: "> ",
    unknown_command: "Unknown command: {input}",
    no_such_entry: "No file numbered {index}",
    cancelled: "Move cancelled",
    result: "Moved: {moved}, Skipped: {skipped}, Replaced: {replaced}",
    error: "Move failed: {error}",
    plan_header: "Moving {file} to {folder}",
    destination_exists: "exists",
    no_folders: "No matching folders",
};

pub const ZH: Messages = Messages {
    title: "连同链接文件一起移动",
    description: "以下文件由 {file} 链接。勾选的文件将移动到 {folder}。",
    related_select: "关联选择",
    cascade: "级联",
    file_name: "文件",
    reference_info: "引用",
    root_file: "根文件",
    referenced_by_one: "被引用一次",
    referenced_by_count: "被 {count} 个文件引用",
    stats: "总数：{total}，已选：{selected}，需确认：{needs_confirmation}",
    on: "开",
    off: "关",
    help: "<n> 切换，+<n>/-<n> 勾选/取消，a 全选，n 全不选，r 关联选择，c 级联，y 确认，q 取消",
    prompt: "> ",
    unknown_command: "未知命令：{input}",
    no_such_entry: "没有编号为 {index} 的文件",
    cancelled: "已取消移动",
    result: "已移动：{moved}，已跳过：{skipped}，已替换：{replaced}",
    error: "移动失败：{error}",
    plan_header: "将 {file} 移动到 {folder}",
    destination_exists: "已存在",
    no_folders: "没有匹配的文件夹",
};

impl Messages {
    /// Table for `language`, English when the language is unknown
    pub fn for_language(language: &str) -> &'static Messages {
        let primary = language
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match primary.as_str() {
            "zh" => &ZH,
            _ => &EN,
        }
    }

    /// `Moved: n, Skipped: n, Replaced: n`
    pub fn result_notice(&self, result: &BatchMoveResult) -> String {
        self.result
            .replace("{moved}", &result.moved_count.to_string())
            .replace("{skipped}", &result.skipped_count.to_string())
            .replace("{replaced}", &result.replaced_count.to_string())
    }

    pub fn error_notice(&self, error: &dyn std::fmt::Display) -> String {
        self.error.replace("{error}", &error.to_string())
    }

    pub fn reference_label(&self, reference: ReferenceInfo) -> String {
        match reference {
            ReferenceInfo::Root => self.root_file.to_string(),
            ReferenceInfo::Single => self.referenced_by_one.to_string(),
            ReferenceInfo::Shared(count) => self
                .referenced_by_count
                .replace("{count}", &count.to_string()),
        }
    }

    pub fn stats_line(&self, summary: SelectionSummary) -> String {
        self.stats
            .replace("{total}", &summary.total.to_string())
            .replace("{selected}", &summary.selected.to_string())
            .replace("{needs_confirmation}", &summary.needs_confirmation.to_string())
    }

    pub fn switch(&self, enabled: bool) -> &'static str {
        if enabled { self.on } else { self.off }
    }

    pub fn description_line(&self, file: &DocumentId, folder: &str) -> String {
        self.description
            .replace("{file}", file.path())
            .replace("{folder}", folder)
    }

    pub fn plan_line(&self, file: &DocumentId, folder: &str) -> String {
        self.plan_header
            .replace("{file}", file.path())
            .replace("{folder}", folder)
    }
}
