// ==========================================
// 工具包发布库 - 变更请求 / 组件状态报表
// ==========================================
// 两种报表共用同一查询，只在"激活/默认"标志的叫法上不同
// 过滤规则:
//   工具包 + 组件 -> 先解析为单个组件版本 id，等值过滤
//   仅其一       -> 子查询过滤组件版本 id
//   都没有       -> 不加组件/工具包条件
// 排序: CQ_ID 升序；描述在 SQL 中截断为 MAX_DESC 个字符
// ==========================================

use crate::common::db_utils::query_list;
use crate::common::sql_builder::SqlQueryBuilder;
use crate::context::TkContext;
use crate::domain::change_request::ChangeRequestStatus;
use crate::domain::toolkit::{Component, ToolKit};
use crate::report::format::{header_lines, left_justify, COLUMN_SEPARATOR};
use crate::repository::error::RepositoryResult;
use crate::repository::toolkit_repo::ComponentTkVersionRepository;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// 描述列最大字符数
pub const MAX_DESC: usize = 35;

const SELECT_CLAUSE: &str = "SELECT tk.NAME AS TOOLKIT, c.COMPONENT_NAME AS COMPONENT, \
     cr.CQ_ID AS CQ_ID, s.STATE AS STATE, cr.CREATED_BY AS CREATOR, \
     substr(COALESCE(cr.DESCRIPTION, ''), 1, 35) AS DESCRIPTION \
     FROM TK.CHANGEREQUEST cr";

const BASE_JOINS: [&str; 5] = [
    "JOIN TK.COMPONENT_TKVERSION_X_CHANGEREQUEST cvcrq ON cvcrq.CHANGEREQUEST_ID = cr.CHANGEREQUEST_ID",
    "JOIN TK.COMPONENT_TK_VERSION cv ON cv.COMPONENT_TKVERSION_ID = cvcrq.COMPONENT_TKVERSION_ID",
    "JOIN TK.TOOLKIT tk ON tk.TOOLKIT_ID = cv.TOOLKIT_ID",
    "JOIN TK.COMPONENT c ON c.COMPONENT_ID = cv.COMPONENT_ID",
    "JOIN TK.CHANGEREQUEST_STATUS s ON s.CHANGEREQUEST_STATUS_ID = cr.CHANGEREQUEST_STATUS_ID",
];

/// 关联的四张表都只取未删除行
const LIVE_FILTERS: [&str; 4] = [
    "cr.DELETED_ON IS NULL",
    "cv.DELETED_ON IS NULL",
    "tk.DELETED_ON IS NULL",
    "c.DELETED_ON IS NULL",
];

const ACTIVE_JOIN: &str = "JOIN TK.CHANGEREQUEST_ACTIVE act \
     ON act.COMPONENT_TKVERSION_ID = cvcrq.COMPONENT_TKVERSION_ID \
     AND act.CHANGEREQUEST_ID = cr.CHANGEREQUEST_ID";

const VERSION_EQ_FILTER: &str = "cvcrq.COMPONENT_TKVERSION_ID = ?";
const TOOLKIT_SUBQUERY_FILTER: &str = "cvcrq.COMPONENT_TKVERSION_ID in \
     (select COMPONENT_TKVERSION_ID from TK.COMPONENT_TK_VERSION where TOOLKIT_ID = ? and DELETED_ON IS NULL)";
const COMPONENT_SUBQUERY_FILTER: &str = "cvcrq.COMPONENT_TKVERSION_ID in \
     (select COMPONENT_TKVERSION_ID from TK.COMPONENT_TK_VERSION where COMPONENT_ID = ? and DELETED_ON IS NULL)";
const STATUS_FILTER: &str = "cr.CHANGEREQUEST_STATUS_ID = ?";

/// 列宽: 工具包, 组件, CQ 编号, 状态, 创建人, 描述
pub const COLUMN_WIDTHS: [usize; 6] = [8, 14, 12, 12, 10, MAX_DESC];
pub const COLUMN_LABELS: [&str; 6] = ["ToolKit", "Component", "CQ Id", "State", "Creator", "Description"];

// ==========================================
// 报表类型与过滤条件
// ==========================================

/// 报表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    /// 变更请求报表，标志位称为 "active"
    ChangeRequest,
    /// 组件状态报表，标志位称为 "default"
    ComponentStatus,
}

impl ReportKind {
    /// 标志位叫法
    pub fn flag_label(&self) -> &'static str {
        match self {
            ReportKind::ChangeRequest => "active",
            ReportKind::ComponentStatus => "default",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::ChangeRequest => "Change Request Report",
            ReportKind::ComponentStatus => "Component Status Report",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// 报表过滤条件（各项可选）
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub toolkit: Option<ToolKit>,
    pub component: Option<Component>,
    pub status: Option<ChangeRequestStatus>,
    /// 只取激活/默认行
    pub active_only: bool,
}

/// 组件版本范围（由工具包/组件过滤条件得出）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentScope {
    Any,
    /// 已解析的单个组件版本 id
    Version(i64),
    Toolkit(i16),
    Component(i16),
}

/// 组装报表查询（纯函数）
///
/// # 返回
/// (SQL, 按占位符顺序排列的参数)
pub fn build_query(
    scope: ComponentScope,
    status_id: Option<i16>,
    active_only: bool,
) -> (String, Vec<Value>) {
    let mut builder = SqlQueryBuilder::new(SELECT_CLAUSE);
    for join in BASE_JOINS {
        builder = builder.join(join);
    }
    builder = builder.join_if(active_only, ACTIVE_JOIN);
    for live in LIVE_FILTERS {
        builder = builder.where_clause(live);
    }

    builder = match scope {
        ComponentScope::Any => builder,
        ComponentScope::Version(id) => builder.where_bind(VERSION_EQ_FILTER, Value::Integer(id)),
        ComponentScope::Toolkit(id) => {
            builder.where_bind(TOOLKIT_SUBQUERY_FILTER, Value::Integer(id.into()))
        }
        ComponentScope::Component(id) => {
            builder.where_bind(COMPONENT_SUBQUERY_FILTER, Value::Integer(id.into()))
        }
    };

    builder
        .and_if(STATUS_FILTER, status_id.map(|id| Value::Integer(id.into())))
        .order_by("cr.CQ_ID ASC")
        .build()
}

// ==========================================
// 报表行
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub toolkit: String,
    pub component: String,
    pub cq_id: String,
    pub state: String,
    pub creator: Option<String>,
    /// 已截断到 MAX_DESC
    pub description: String,
}

impl ReportRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ReportRow {
            toolkit: row.get("TOOLKIT")?,
            component: row.get("COMPONENT")?,
            cq_id: row.get("CQ_ID")?,
            state: row.get("STATE")?,
            creator: row.get("CREATOR")?,
            description: row.get("DESCRIPTION")?,
        })
    }

    /// 定宽文本行
    pub fn format_line(&self) -> String {
        let fields = [
            self.toolkit.as_str(),
            self.component.as_str(),
            self.cq_id.as_str(),
            self.state.as_str(),
            self.creator.as_deref().unwrap_or(""),
            self.description.as_str(),
        ];
        fields
            .iter()
            .zip(COLUMN_WIDTHS.iter())
            .map(|(field, width)| left_justify(field, *width))
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR)
            .trim_end()
            .to_string()
    }
}

// ==========================================
// ChangeRequestReport
// ==========================================
pub struct ChangeRequestReport {
    ctx: Arc<TkContext>,
    kind: ReportKind,
}

impl ChangeRequestReport {
    pub fn new(ctx: Arc<TkContext>, kind: ReportKind) -> Self {
        Self { ctx, kind }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    /// 表头（列名行 + 短横线行）
    pub fn header(&self) -> Vec<String> {
        header_lines(&COLUMN_LABELS, &COLUMN_WIDTHS)
    }

    /// 把过滤条件解析为组件版本范围
    ///
    /// 工具包与组件同时给出但没有对应组件版本时返回 None
    pub fn resolve_scope(&self, filter: &ReportFilter) -> RepositoryResult<Option<ComponentScope>> {
        let scope = match (&filter.toolkit, &filter.component) {
            (Some(tk), Some(comp)) => {
                let versions = ComponentTkVersionRepository::new(Arc::clone(&self.ctx));
                match versions.find_by_toolkit_and_component(tk.id, comp.id)? {
                    Some(cv) => ComponentScope::Version(cv.id),
                    None => {
                        tracing::warn!(
                            toolkit = %tk.name,
                            component = %comp.name,
                            "工具包下不存在该组件版本"
                        );
                        return Ok(None);
                    }
                }
            }
            (Some(tk), None) => ComponentScope::Toolkit(tk.id),
            (None, Some(comp)) => ComponentScope::Component(comp.id),
            (None, None) => ComponentScope::Any,
        };
        Ok(Some(scope))
    }

    /// 执行报表查询
    pub fn rows(&self, filter: &ReportFilter) -> RepositoryResult<Vec<ReportRow>> {
        let scope = match self.resolve_scope(filter)? {
            Some(scope) => scope,
            None => return Ok(Vec::new()),
        };
        let (sql, params) = build_query(
            scope,
            filter.status.as_ref().map(|s| s.id),
            filter.active_only,
        );

        let conn = self.ctx.lock()?;
        let rows = query_list(&conn, &sql, &params, ReportRow::from_row)?;

        tracing::info!(
            report = %self.kind,
            scope = ?scope,
            flag = self.kind.flag_label(),
            only_flagged = filter.active_only,
            row_count = rows.len(),
            "报表查询完成"
        );
        Ok(rows)
    }

    /// 执行并格式化为文本行（不含表头）
    pub fn lines(&self, filter: &ReportFilter) -> RepositoryResult<Vec<String>> {
        Ok(self.rows(filter)?.iter().map(ReportRow::format_line).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_filters_use_equality_form() {
        let (sql, params) = build_query(ComponentScope::Version(7), None, false);
        assert!(sql.contains("cvcrq.COMPONENT_TKVERSION_ID = ?"));
        assert!(!sql.contains("in (select"));
        assert!(!sql.contains("CHANGEREQUEST_ACTIVE"));
        assert_eq!(params, vec![Value::Integer(7)]);
    }

    #[test]
    fn test_single_filter_uses_subquery() {
        let (sql, params) = build_query(ComponentScope::Toolkit(3), None, false);
        assert!(sql.contains("cvcrq.COMPONENT_TKVERSION_ID in (select"));
        assert!(sql.contains("where TOOLKIT_ID = ?"));
        assert_eq!(params, vec![Value::Integer(3)]);

        let (sql, _) = build_query(ComponentScope::Component(4), None, false);
        assert!(sql.contains("where COMPONENT_ID = ?"));
        assert!(!sql.contains("cvcrq.COMPONENT_TKVERSION_ID = ?"));
    }

    #[test]
    fn test_no_filter_and_status_and_active() {
        let (sql, params) = build_query(ComponentScope::Any, Some(2), true);
        assert!(!sql.contains("cvcrq.COMPONENT_TKVERSION_ID = ?"));
        assert!(!sql.contains("in (select"));
        assert!(sql.contains("cr.CHANGEREQUEST_STATUS_ID = ?"));
        assert!(sql.contains("JOIN TK.CHANGEREQUEST_ACTIVE act"));
        assert!(sql.ends_with("ORDER BY cr.CQ_ID ASC"));
        assert_eq!(params, vec![Value::Integer(2)]);
    }

    #[test]
    fn test_params_follow_placeholder_order() {
        let (_, params) = build_query(ComponentScope::Version(9), Some(1), false);
        assert_eq!(params, vec![Value::Integer(9), Value::Integer(1)]);
    }

    #[test]
    fn test_description_cut_in_sql() {
        let (sql, _) = build_query(ComponentScope::Any, None, false);
        assert!(sql.contains(&format!("substr(COALESCE(cr.DESCRIPTION, ''), 1, {})", MAX_DESC)));
    }

    #[test]
    fn test_every_scope_filters_deleted_rows() {
        let scopes = [
            ComponentScope::Any,
            ComponentScope::Version(1),
            ComponentScope::Toolkit(1),
            ComponentScope::Component(1),
        ];
        for scope in scopes {
            let (sql, _) = build_query(scope, None, false);
            for live in LIVE_FILTERS {
                assert!(sql.contains(live), "{:?} 缺少 {}", scope, live);
            }
        }
    }

    #[test]
    fn test_flag_labels() {
        assert_eq!(ReportKind::ChangeRequest.flag_label(), "active");
        assert_eq!(ReportKind::ComponentStatus.flag_label(), "default");
    }

    #[test]
    fn test_format_line() {
        let row = ReportRow {
            toolkit: "14.1".into(),
            component: "sta".into(),
            cq_id: "CQ00001".into(),
            state: "Open".into(),
            creator: Some("alice".into()),
            description: "fix".into(),
        };
        let line = row.format_line();
        assert!(line.starts_with("14.1     sta            CQ00001"));
        assert!(line.ends_with("alice      fix"));
    }
}
