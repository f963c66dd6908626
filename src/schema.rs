// ==========================================
// 工具包发布库 - TK schema 定义
// ==========================================
// 所有表位于 TK schema（SQLite 中以 ATTACH ... AS TK 挂载）
// 表名/列名为既有库的字面常量，不得改名
// ==========================================

/// 当前代码所期望的 schema 版本
pub const CURRENT_SCHEMA_VERSION: i64 = 4;

/// TK schema 建表语句（幂等）
pub const TK_SCHEMA_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS TK.SCHEMA_VERSION (
    VERSION     INTEGER PRIMARY KEY,
    APPLIED_ON  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS TK.ID_SEQUENCE (
    TABLE_NAME  TEXT NOT NULL,
    COLUMN_NAME TEXT NOT NULL,
    NEXT_ID     INTEGER NOT NULL,
    PRIMARY KEY (TABLE_NAME, COLUMN_NAME)
);

-- ===== 名称字典表 =====

CREATE TABLE IF NOT EXISTS TK.ACCESS_TYPE (
    ACCESS_TYPE_ID  INTEGER PRIMARY KEY,
    ACCESS_TYPE     TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS TK.CODEUPDATE_STATUS_NAME (
    CODEUPDATE_STATUS_NAME_ID   INTEGER PRIMARY KEY,
    CODEUPDATE_STATUS_NAME      TEXT NOT NULL,
    DESCRIPTION                 TEXT,
    CREATED_BY TEXT, CREATED_ON TEXT,
    UPDATED_BY TEXT, UPDATED_ON TEXT,
    DELETED_BY TEXT, DELETED_ON TEXT
);

CREATE TABLE IF NOT EXISTS TK.DELIVERABLEUPDATE_STATUS_NAME (
    DELIVERABLEUPDATE_STATUS_NAME_ID    INTEGER PRIMARY KEY,
    DELIVERABLEUPDATE_STATUS_NAME       TEXT NOT NULL,
    DESCRIPTION                         TEXT,
    CREATED_BY TEXT, CREATED_ON TEXT,
    UPDATED_BY TEXT, UPDATED_ON TEXT,
    DELETED_BY TEXT, DELETED_ON TEXT
);

CREATE TABLE IF NOT EXISTS TK.EVENT_NAME (
    EVENT_NAME_ID   INTEGER PRIMARY KEY,
    EVENT_NAME      TEXT NOT NULL,
    DESCRIPTION     TEXT,
    CREATED_BY TEXT, CREATED_ON TEXT,
    UPDATED_BY TEXT, UPDATED_ON TEXT,
    DELETED_BY TEXT, DELETED_ON TEXT
);

CREATE TABLE IF NOT EXISTS TK.FILE_ACTION_NAME (
    FILE_ACTION_NAME_ID INTEGER PRIMARY KEY,
    FILE_ACTION_NAME    TEXT NOT NULL,
    SVN_ACTION_NAME     TEXT,
    CREATED_BY TEXT, CREATED_ON TEXT,
    UPDATED_BY TEXT, UPDATED_ON TEXT,
    DELETED_BY TEXT, DELETED_ON TEXT
);

CREATE TABLE IF NOT EXISTS TK.LOCATION_EVENT_NAME (
    LOCATION_EVENT_NAME_ID  INTEGER PRIMARY KEY,
    LOCATION_EVENT_NAME     TEXT NOT NULL,
    REQUIRES_PLATFORM       TEXT NOT NULL DEFAULT 'N',
    CREATED_BY TEXT, CREATED_ON TEXT,
    UPDATED_BY TEXT, UPDATED_ON TEXT,
    DELETED_BY TEXT, DELETED_ON TEXT
);

-- ===== 工具包 / 组件 / 平台 =====

CREATE TABLE IF NOT EXISTS TK.TOOLKIT (
    TOOLKIT_ID  INTEGER PRIMARY KEY,
    NAME        TEXT NOT NULL,
    DESCRIPTION TEXT,
    CREATED_BY TEXT, CREATED_ON TEXT,
    UPDATED_BY TEXT, UPDATED_ON TEXT,
    DELETED_BY TEXT, DELETED_ON TEXT
);

CREATE TABLE IF NOT EXISTS TK.COMPONENT (
    COMPONENT_ID    INTEGER PRIMARY KEY,
    COMPONENT_NAME  TEXT NOT NULL,
    CREATED_BY TEXT, CREATED_ON TEXT,
    UPDATED_BY TEXT, UPDATED_ON TEXT,
    DELETED_BY TEXT, DELETED_ON TEXT
);

CREATE TABLE IF NOT EXISTS TK.COMPONENT_TK_VERSION (
    COMPONENT_TKVERSION_ID  INTEGER PRIMARY KEY,
    COMPONENT_ID            INTEGER NOT NULL REFERENCES COMPONENT(COMPONENT_ID),
    TOOLKIT_ID              INTEGER NOT NULL REFERENCES TOOLKIT(TOOLKIT_ID),
    CREATED_BY TEXT, CREATED_ON TEXT,
    UPDATED_BY TEXT, UPDATED_ON TEXT,
    DELETED_BY TEXT, DELETED_ON TEXT
);

CREATE TABLE IF NOT EXISTS TK.PLATFORM (
    PLATFORM_ID     INTEGER PRIMARY KEY,
    PLATFORM_NAME   TEXT NOT NULL,
    CREATED_BY TEXT, CREATED_ON TEXT,
    UPDATED_BY TEXT, UPDATED_ON TEXT,
    DELETED_BY TEXT, DELETED_ON TEXT
);

CREATE TABLE IF NOT EXISTS TK.RELEASEPACKAGE (
    RELEASEPACKAGE_ID   INTEGER PRIMARY KEY,
    NAME                TEXT NOT NULL,
    TOOLKIT_ID          INTEGER NOT NULL REFERENCES TOOLKIT(TOOLKIT_ID),
    CREATED_BY TEXT, CREATED_ON TEXT,
    UPDATED_BY TEXT, UPDATED_ON TEXT,
    DELETED_BY TEXT, DELETED_ON TEXT
);

-- ===== 变更请求 / 代码更新 =====

CREATE TABLE IF NOT EXISTS TK.CHANGEREQUEST_STATUS (
    CHANGEREQUEST_STATUS_ID INTEGER PRIMARY KEY,
    STATE                   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS TK.CHANGEREQUEST (
    CHANGEREQUEST_ID        INTEGER PRIMARY KEY,
    CQ_ID                   TEXT NOT NULL,
    DESCRIPTION             TEXT,
    CHANGEREQUEST_STATUS_ID INTEGER NOT NULL REFERENCES CHANGEREQUEST_STATUS(CHANGEREQUEST_STATUS_ID),
    CREATED_BY TEXT, CREATED_ON TEXT,
    UPDATED_BY TEXT, UPDATED_ON TEXT,
    DELETED_BY TEXT, DELETED_ON TEXT
);

CREATE TABLE IF NOT EXISTS TK.COMPONENT_TKVERSION_X_CHANGEREQUEST (
    COMPONENT_TKVERSION_ID  INTEGER NOT NULL REFERENCES COMPONENT_TK_VERSION(COMPONENT_TKVERSION_ID),
    CHANGEREQUEST_ID        INTEGER NOT NULL REFERENCES CHANGEREQUEST(CHANGEREQUEST_ID),
    PRIMARY KEY (COMPONENT_TKVERSION_ID, CHANGEREQUEST_ID)
);

CREATE TABLE IF NOT EXISTS TK.CHANGEREQUEST_ACTIVE (
    COMPONENT_TKVERSION_ID  INTEGER NOT NULL REFERENCES COMPONENT_TK_VERSION(COMPONENT_TKVERSION_ID),
    CHANGEREQUEST_ID        INTEGER NOT NULL REFERENCES CHANGEREQUEST(CHANGEREQUEST_ID),
    PRIMARY KEY (COMPONENT_TKVERSION_ID, CHANGEREQUEST_ID)
);

CREATE TABLE IF NOT EXISTS TK.CODEUPDATE (
    CODEUPDATE_ID           INTEGER PRIMARY KEY,
    COMPONENT_TKVERSION_ID  INTEGER NOT NULL REFERENCES COMPONENT_TK_VERSION(COMPONENT_TKVERSION_ID),
    REVISION                TEXT NOT NULL,
    COMMENTS                TEXT,
    CREATED_BY TEXT, CREATED_ON TEXT,
    UPDATED_BY TEXT, UPDATED_ON TEXT,
    DELETED_BY TEXT, DELETED_ON TEXT
);

CREATE TABLE IF NOT EXISTS TK.FUNCTIONALUPDATE (
    FUNCTIONALUPDATE_ID INTEGER PRIMARY KEY,
    DESCRIPTION         TEXT NOT NULL,
    CREATED_BY          TEXT,
    CREATED_ON          TEXT
);

CREATE TABLE IF NOT EXISTS TK.CODEUPDATE_X_CHANGEREQUEST (
    CODEUPDATE_ID       INTEGER NOT NULL REFERENCES CODEUPDATE(CODEUPDATE_ID),
    CHANGEREQUEST_ID    INTEGER NOT NULL REFERENCES CHANGEREQUEST(CHANGEREQUEST_ID),
    PRIMARY KEY (CODEUPDATE_ID, CHANGEREQUEST_ID)
);

CREATE TABLE IF NOT EXISTS TK.CODEUPDATE_X_FUNCTIONALUPDATE (
    CODEUPDATE_ID       INTEGER NOT NULL REFERENCES CODEUPDATE(CODEUPDATE_ID),
    FUNCTIONALUPDATE_ID INTEGER NOT NULL REFERENCES FUNCTIONALUPDATE(FUNCTIONALUPDATE_ID),
    PRIMARY KEY (CODEUPDATE_ID, FUNCTIONALUPDATE_ID)
);

-- ===== 交付物 / 发布 =====

CREATE TABLE IF NOT EXISTS TK.DELIVERABLEUPDATE (
    DELIVERABLEUPDATE_ID    INTEGER PRIMARY KEY,
    PLATFORM_ID             INTEGER NOT NULL REFERENCES PLATFORM(PLATFORM_ID),
    CURRENT_STATUS_ID       INTEGER REFERENCES DELIVERABLEUPDATE_STATUS_NAME(DELIVERABLEUPDATE_STATUS_NAME_ID),
    CREATED_BY TEXT, CREATED_ON TEXT,
    UPDATED_BY TEXT, UPDATED_ON TEXT,
    DELETED_BY TEXT, DELETED_ON TEXT
);

CREATE TABLE IF NOT EXISTS TK.RELEASEPACKAGE_X_COMPONENT_TK_VERSION (
    RELEASEPACKAGE_ID       INTEGER NOT NULL REFERENCES RELEASEPACKAGE(RELEASEPACKAGE_ID),
    COMPONENT_TKVERSION_ID  INTEGER NOT NULL REFERENCES COMPONENT_TK_VERSION(COMPONENT_TKVERSION_ID),
    PRIMARY KEY (RELEASEPACKAGE_ID, COMPONENT_TKVERSION_ID)
);

CREATE TABLE IF NOT EXISTS TK.RELEASE_X_PLATFORM (
    TOOLKIT_ID  INTEGER NOT NULL REFERENCES TOOLKIT(TOOLKIT_ID),
    PLATFORM_ID INTEGER NOT NULL REFERENCES PLATFORM(PLATFORM_ID),
    PRIMARY KEY (TOOLKIT_ID, PLATFORM_ID)
);

-- ===== 文件 / 事件 =====

CREATE TABLE IF NOT EXISTS TK.FILE_NAME (
    FILE_NAME_ID    INTEGER PRIMARY KEY,
    FILE_NAME       TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS TK.FILE_CONTENT (
    FILE_CONTENT_ID INTEGER PRIMARY KEY,
    FILE_NAME_ID    INTEGER NOT NULL REFERENCES FILE_NAME(FILE_NAME_ID),
    CHECKSUM        TEXT NOT NULL,
    CONTENT         BLOB,
    CREATED_ON      TEXT,
    MODIFIED_ON     TEXT
);

CREATE TABLE IF NOT EXISTS TK.EVENTS (
    EVENT_ID        INTEGER PRIMARY KEY,
    EVENT_NAME_ID   INTEGER NOT NULL REFERENCES EVENT_NAME(EVENT_NAME_ID),
    COMMENTS        TEXT,
    CREATED_BY      TEXT,
    CREATED_ON      TEXT
);

-- ===== 业务名称唯一性 =====
-- 软删除表只约束未删除行，已删除的名称可以重新使用

CREATE UNIQUE INDEX IF NOT EXISTS TK.UX_CODEUPDATE_STATUS_NAME
    ON CODEUPDATE_STATUS_NAME(CODEUPDATE_STATUS_NAME) WHERE DELETED_ON IS NULL;
CREATE UNIQUE INDEX IF NOT EXISTS TK.UX_DELIVERABLEUPDATE_STATUS_NAME
    ON DELIVERABLEUPDATE_STATUS_NAME(DELIVERABLEUPDATE_STATUS_NAME) WHERE DELETED_ON IS NULL;
CREATE UNIQUE INDEX IF NOT EXISTS TK.UX_EVENT_NAME
    ON EVENT_NAME(EVENT_NAME) WHERE DELETED_ON IS NULL;
CREATE UNIQUE INDEX IF NOT EXISTS TK.UX_FILE_ACTION_NAME
    ON FILE_ACTION_NAME(FILE_ACTION_NAME) WHERE DELETED_ON IS NULL;
CREATE UNIQUE INDEX IF NOT EXISTS TK.UX_LOCATION_EVENT_NAME
    ON LOCATION_EVENT_NAME(LOCATION_EVENT_NAME) WHERE DELETED_ON IS NULL;
CREATE UNIQUE INDEX IF NOT EXISTS TK.UX_TOOLKIT_NAME
    ON TOOLKIT(NAME) WHERE DELETED_ON IS NULL;
CREATE UNIQUE INDEX IF NOT EXISTS TK.UX_COMPONENT_NAME
    ON COMPONENT(COMPONENT_NAME) WHERE DELETED_ON IS NULL;
CREATE UNIQUE INDEX IF NOT EXISTS TK.UX_COMPONENT_TK_VERSION
    ON COMPONENT_TK_VERSION(COMPONENT_ID, TOOLKIT_ID) WHERE DELETED_ON IS NULL;
CREATE UNIQUE INDEX IF NOT EXISTS TK.UX_PLATFORM_NAME
    ON PLATFORM(PLATFORM_NAME) WHERE DELETED_ON IS NULL;
CREATE UNIQUE INDEX IF NOT EXISTS TK.UX_RELEASEPACKAGE_NAME
    ON RELEASEPACKAGE(NAME) WHERE DELETED_ON IS NULL;
CREATE UNIQUE INDEX IF NOT EXISTS TK.UX_CHANGEREQUEST_CQ_ID
    ON CHANGEREQUEST(CQ_ID) WHERE DELETED_ON IS NULL;
CREATE UNIQUE INDEX IF NOT EXISTS TK.UX_CHANGEREQUEST_STATE
    ON CHANGEREQUEST_STATUS(STATE);
"#;
