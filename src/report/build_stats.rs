// ==========================================
// 工具包发布库 - 构建统计报表
// ==========================================
// 调用方提供任意查询 + 平行的列名/列宽数组
// 结果固定为 4 列: 3 个文本列 + 1 个时间戳列
// 首列左对齐，其余列居中
// ==========================================

use crate::common::db_utils::{execute, prep_statement};
use crate::context::TkContext;
use crate::report::format::{format_columns, header_lines, timestamp_text, value_text};
use crate::repository::error::{RepositoryError, RepositoryResult};
use serde::Serialize;
use std::io::Write;

/// 结果集至少应有的列数
pub const EXPECTED_COLUMNS: usize = 4;

/// 时间戳列下标
const TIMESTAMP_COLUMN: usize = 3;

/// 按固定规则格式化一行（首列左对齐，其余居中）
pub fn format_line(data: &[String], widths: &[usize]) -> String {
    format_columns(data, widths)
}

/// 构建统计报表定义
#[derive(Debug, Clone)]
pub struct BuildStatsReport {
    sql: String,
    headers: Vec<String>,
    widths: Vec<usize>,
}

/// 报表输出
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildStatsOutput {
    /// 定宽格式化行
    pub lines: Vec<String>,
    /// 未格式化、空格连接的原始行
    pub raw_rows: Vec<String>,
    /// 原始字段（CSV 导出用）
    pub records: Vec<Vec<String>>,
}

impl BuildStatsReport {
    /// 创建报表定义
    ///
    /// 列名与列宽数量必须一致
    pub fn new(sql: impl Into<String>, headers: Vec<String>, widths: Vec<usize>) -> RepositoryResult<Self> {
        if headers.len() != widths.len() {
            return Err(RepositoryError::ValidationError(format!(
                "列名 {} 个，列宽 {} 个",
                headers.len(),
                widths.len()
            ))
            .logged());
        }
        Ok(Self {
            sql: sql.into(),
            headers,
            widths,
        })
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// 表头（列名行 + 短横线行）
    pub fn header(&self) -> Vec<String> {
        let labels: Vec<&str> = self.headers.iter().map(String::as_str).collect();
        header_lines(&labels, &self.widths)
    }

    pub fn format_line(&self, data: &[String]) -> String {
        format_line(data, &self.widths)
    }

    /// 执行查询并格式化
    pub fn run(&self, ctx: &TkContext) -> RepositoryResult<BuildStatsOutput> {
        let conn = ctx.lock()?;
        let mut stmt = prep_statement(&conn, &self.sql)?;

        // 列数在准备阶段即可确定，不满足时不执行语句
        let column_count = stmt.column_count();
        if column_count < EXPECTED_COLUMNS {
            return Err(RepositoryError::ReportShape {
                expected: EXPECTED_COLUMNS,
                actual: column_count,
            }
            .logged());
        }

        let table = execute(&mut stmt, &[])?.ok_or_else(|| {
            RepositoryError::ReportShape {
                expected: EXPECTED_COLUMNS,
                actual: 0,
            }
            .logged()
        })?;

        let mut output = BuildStatsOutput::default();
        for row in &table.rows {
            let fields: Vec<String> = row
                .iter()
                .take(EXPECTED_COLUMNS)
                .enumerate()
                .map(|(i, v)| {
                    if i == TIMESTAMP_COLUMN {
                        timestamp_text(v)
                    } else {
                        value_text(v)
                    }
                })
                .collect();

            output.lines.push(self.format_line(&fields));
            output.raw_rows.push(fields.join(" "));
            output.records.push(fields);
        }

        tracing::info!(row_count = output.lines.len(), "构建统计报表完成");
        Ok(output)
    }

    /// 以 CSV 导出原始字段（首行为列名）
    pub fn write_csv<W: Write>(&self, output: &BuildStatsOutput, writer: W) -> RepositoryResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer
            .write_record(&self.headers)
            .map_err(|e| RepositoryError::Other(e.into()).logged())?;
        for record in &output.records {
            csv_writer
                .write_record(record)
                .map_err(|e| RepositoryError::Other(e.into()).logged())?;
        }
        csv_writer
            .flush()
            .map_err(|e| RepositoryError::Other(e.into()).logged())?;
        Ok(())
    }
}
