// ==========================================
// 工具包发布库 - SQL 构建工具模块
// ==========================================
// 职责: 以纯函数方式拼装 (SQL, 参数)，不持有语句状态
// ==========================================

use rusqlite::types::Value;

/// SQL 查询构建器（流式 API）
///
/// 条件与其绑定参数一起登记，`build()` 返回 SQL 文本和按占位符顺序排列的参数。
///
/// # 示例
/// ```
/// use tk_dao::common::sql_builder::SqlQueryBuilder;
/// use rusqlite::types::Value;
///
/// let (sql, params) = SqlQueryBuilder::new("SELECT * FROM TK.CHANGEREQUEST cr")
///     .join("JOIN TK.CHANGEREQUEST_STATUS s ON s.CHANGEREQUEST_STATUS_ID = cr.CHANGEREQUEST_STATUS_ID")
///     .where_bind("s.CHANGEREQUEST_STATUS_ID = ?", Value::Integer(2))
///     .order_by("cr.CQ_ID ASC")
///     .build();
///
/// assert!(sql.contains("WHERE s.CHANGEREQUEST_STATUS_ID = ?"));
/// assert!(sql.ends_with("ORDER BY cr.CQ_ID ASC"));
/// assert_eq!(params, vec![Value::Integer(2)]);
/// ```
#[derive(Debug, Clone)]
pub struct SqlQueryBuilder {
    select_clause: String,
    joins: Vec<String>,
    where_clauses: Vec<String>,
    params: Vec<Value>,
    order_by_clause: Option<String>,
    limit_clause: Option<usize>,
}

impl SqlQueryBuilder {
    /// 创建新的 SQL 查询构建器（`select` 含 FROM 子句）
    pub fn new(select: &str) -> Self {
        Self {
            select_clause: select.to_string(),
            joins: Vec::new(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_by_clause: None,
            limit_clause: None,
        }
    }

    /// 追加 JOIN 子句
    pub fn join(mut self, join: &str) -> Self {
        self.joins.push(join.to_string());
        self
    }

    /// 条件追加 JOIN 子句
    pub fn join_if(self, enabled: bool, join: &str) -> Self {
        if enabled {
            self.join(join)
        } else {
            self
        }
    }

    /// 添加不带参数的 WHERE 条件
    pub fn where_clause(mut self, condition: &str) -> Self {
        self.where_clauses.push(condition.to_string());
        self
    }

    /// 添加带一个绑定参数的 WHERE 条件
    pub fn where_bind(mut self, condition: &str, value: Value) -> Self {
        self.where_clauses.push(condition.to_string());
        self.params.push(value);
        self
    }

    /// 参数存在时添加条件
    pub fn and_if(self, condition: &str, value: Option<Value>) -> Self {
        match value {
            Some(v) => self.where_bind(condition, v),
            None => self,
        }
    }

    /// 添加 ORDER BY 子句
    pub fn order_by(mut self, order: &str) -> Self {
        self.order_by_clause = Some(order.to_string());
        self
    }

    /// 添加 LIMIT 子句
    pub fn limit(mut self, n: usize) -> Self {
        self.limit_clause = Some(n);
        self
    }

    /// 构建最终的 SQL 语句及参数
    pub fn build(&self) -> (String, Vec<Value>) {
        let mut sql = self.select_clause.clone();

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        // 添加 WHERE 条件
        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }

        // 添加 ORDER BY
        if let Some(order) = &self.order_by_clause {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        // 添加 LIMIT
        if let Some(limit) = self.limit_clause {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        (sql, self.params.clone())
    }
}

/// 逗号连接列名，可带表别名前缀
pub fn column_list(columns: &[&str], alias: Option<&str>) -> String {
    columns
        .iter()
        .map(|c| match alias {
            Some(a) => format!("{}.{}", a, c),
            None => c.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// 生成 `?1, ?2, ...` 形式的占位符
pub fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

// ==========================================
// 单元测试
// ==========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_builder_basic() {
        let (sql, params) = SqlQueryBuilder::new("SELECT * FROM TK.EVENTS")
            .where_bind("EVENT_NAME_ID = ?", Value::Integer(3))
            .build();

        assert_eq!(sql, "SELECT * FROM TK.EVENTS WHERE EVENT_NAME_ID = ?");
        assert_eq!(params, vec![Value::Integer(3)]);
    }

    #[test]
    fn test_sql_builder_and_if_with_none() {
        let (sql, params) = SqlQueryBuilder::new("SELECT * FROM TK.EVENTS")
            .where_clause("1 = 1")
            .and_if("EVENT_NAME_ID = ?", None)
            .order_by("EVENT_ID DESC")
            .build();

        assert_eq!(sql, "SELECT * FROM TK.EVENTS WHERE 1 = 1 ORDER BY EVENT_ID DESC");
        assert!(params.is_empty());
    }

    #[test]
    fn test_sql_builder_joins_keep_order() {
        let (sql, _) = SqlQueryBuilder::new("SELECT * FROM A a")
            .join("JOIN B b ON b.ID = a.ID")
            .join_if(false, "JOIN C c ON c.ID = a.ID")
            .join_if(true, "JOIN D d ON d.ID = a.ID")
            .limit(5)
            .build();

        assert_eq!(
            sql,
            "SELECT * FROM A a JOIN B b ON b.ID = a.ID JOIN D d ON d.ID = a.ID LIMIT 5"
        );
    }

    #[test]
    fn test_sql_builder_params_follow_clause_order() {
        let (sql, params) = SqlQueryBuilder::new("SELECT 1")
            .where_bind("a = ?", Value::Integer(1))
            .and_if("b = ?", Some(Value::Text("x".into())))
            .where_bind("c = ?", Value::Integer(3))
            .build();

        assert!(sql.contains("WHERE a = ? AND b = ? AND c = ?"));
        assert_eq!(
            params,
            vec![Value::Integer(1), Value::Text("x".into()), Value::Integer(3)]
        );
    }

    #[test]
    fn test_column_list_and_placeholders() {
        assert_eq!(column_list(&["A", "B"], None), "A, B");
        assert_eq!(column_list(&["A", "B"], Some("t")), "t.A, t.B");
        assert_eq!(placeholders(3), "?1, ?2, ?3");
    }
}
