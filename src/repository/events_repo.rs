// ==========================================
// 工具包发布库 - 事件仓储
// ==========================================
// 表: TK.EVENTS（只追加: 不允许更新/删除）
// 外键: EVENT_NAME_ID -> TK.EVENT_NAME
// ==========================================

use crate::domain::event::Event;
use crate::domain::names::EventName;
use crate::repository::error::RepositoryResult;
use crate::repository::table::{
    AuditColumns, DeleteMode, TableRepository, TableRow, TableSpec, CREATED_BY, CREATED_ON,
};
use rusqlite::types::Value;
use rusqlite::Row;

pub const TABLE: &str = "TK.EVENTS";
pub const ID_COL: &str = "EVENT_ID";
pub const EVENT_NAME_COL: &str = "EVENT_NAME_ID";
pub const COMMENTS_COL: &str = "COMMENTS";

impl TableRow for Event {
    type Id = i64;

    const SPEC: TableSpec = TableSpec {
        entity: "Events",
        table: TABLE,
        id_column: ID_COL,
        name_column: None,
        columns: &[ID_COL, EVENT_NAME_COL, COMMENTS_COL],
        audit: AuditColumns::Created,
        delete_mode: DeleteMode::Never,
        updatable: false,
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Event {
            id: row.get(ID_COL)?,
            event_name_id: row.get(EVENT_NAME_COL)?,
            comments: row.get(COMMENTS_COL)?,
            created_by: row.get(CREATED_BY)?,
            created_on: row.get(CREATED_ON)?,
        })
    }

    fn insert_values(&self, id: i64) -> Vec<Value> {
        vec![
            Value::from(id),
            Value::from(self.event_name_id),
            Value::from(self.comments.clone()),
        ]
    }
}

/// 事件仓储
pub type EventsRepository = TableRepository<Event>;

impl Event {
    pub fn new(event_name_id: i16, comments: Option<String>) -> Self {
        Self {
            id: 0,
            event_name_id,
            comments,
            created_by: None,
            created_on: None,
        }
    }
}

impl TableRepository<Event> {
    /// 某类事件的全部记录，按 id 升序
    pub fn find_by_event_name(&self, event_name_id: i16) -> RepositoryResult<Vec<Event>> {
        self.find_where(&format!("{} = ?1", EVENT_NAME_COL), &[Value::from(event_name_id)])
    }

    /// 外键: 事件名
    pub fn event_name(&self, row: &Event) -> RepositoryResult<EventName> {
        TableRepository::<EventName>::new(self.context().clone()).get_by_id(row.event_name_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TkContext;
    use crate::repository::event_name_repo::EventNameRepository;
    use crate::repository::RepositoryError;

    #[test]
    fn test_events_append_only() {
        let ctx = TkContext::in_memory("builder").unwrap();
        let name = EventNameRepository::new(ctx.clone())
            .insert(&EventName::new("BUILD_START", None))
            .unwrap();
        let repo = EventsRepository::new(ctx);

        let mut ev = repo
            .insert(&Event::new(name.id, Some("nightly".to_string())))
            .unwrap();
        assert_eq!(ev.created_by.as_deref(), Some("builder"));
        assert!(ev.created_on.is_some());
        assert_eq!(repo.event_name(&ev).unwrap().name, "BUILD_START");

        let err = repo
            .update_columns(&mut ev, &[(COMMENTS_COL, Value::Null)])
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Unsupported { .. }));
        assert!(matches!(repo.delete(ev.id).unwrap_err(), RepositoryError::Unsupported { .. }));
    }

    #[test]
    fn test_find_by_event_name_orders_by_id() {
        let ctx = TkContext::in_memory("builder").unwrap();
        let names = EventNameRepository::new(ctx.clone());
        let start = names.insert(&EventName::new("BUILD_START", None)).unwrap();
        let end = names.insert(&EventName::new("BUILD_END", None)).unwrap();
        let repo = EventsRepository::new(ctx);

        let first = repo.insert(&Event::new(start.id, None)).unwrap();
        repo.insert(&Event::new(end.id, None)).unwrap();
        let third = repo.insert(&Event::new(start.id, None)).unwrap();

        let ids: Vec<i64> = repo
            .find_by_event_name(start.id)
            .unwrap()
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![first.id, third.id]);
    }
}
