// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时 TK 库、上下文、报表测试数据
// ==========================================

#![allow(dead_code)]

use std::error::Error;
use std::sync::Arc;
use tempfile::TempDir;
use tk_dao::domain::{
    ChangeRequest, ChangeRequestStatus, Component, ComponentTkVersion, ToolKit,
};
use tk_dao::repository::{
    ActiveChangeRequestRepository, ChangeRequestRepository, ChangeRequestStatusRepository,
    ComponentRepository, ComponentTkVersionRepository, ComponentVersionChangeRequestRepository,
    ToolKitRepository,
};
use tk_dao::{TkConfig, TkContext};

/// 测试配置: 库文件放在临时目录下
pub fn test_config(dir: &TempDir, actor: &str) -> TkConfig {
    TkConfig {
        db_path: dir.path().join("tk.db").to_string_lossy().to_string(),
        actor: actor.to_string(),
        ..TkConfig::default()
    }
}

/// 创建临时 TK 库并打开上下文
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
/// - Arc<TkContext>: 已建表的上下文
pub fn create_test_context(actor: &str) -> Result<(TempDir, Arc<TkContext>), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let ctx = TkContext::open(&test_config(&dir, actor))?;
    Ok((dir, ctx))
}

/// 报表测试数据
pub struct ReleaseFixture {
    pub tk_141: ToolKit,
    pub tk_142: ToolKit,
    pub sta: Component,
    pub ess: Component,
    pub open: ChangeRequestStatus,
    pub closed: ChangeRequestStatus,
    /// 14.1/sta
    pub cv_141_sta: ComponentTkVersion,
    /// 14.1/ess
    pub cv_141_ess: ComponentTkVersion,
    /// 14.2/sta
    pub cv_142_sta: ComponentTkVersion,
}

/// 建立两个工具包 x 两个组件，以及若干变更请求:
///
/// | CQ      | 组件版本  | 状态   | 激活 |
/// |---------|-----------|--------|------|
/// | CQ00003 | 14.1/sta  | Open   | 是   |
/// | CQ00001 | 14.1/sta  | Closed | 否   |
/// | CQ00002 | 14.1/ess  | Open   | 是   |
/// | CQ00004 | 14.2/sta  | Open   | 否   |
pub fn seed_release_data(ctx: &Arc<TkContext>) -> Result<ReleaseFixture, Box<dyn Error>> {
    let toolkits = ToolKitRepository::new(ctx.clone());
    let components = ComponentRepository::new(ctx.clone());
    let versions = ComponentTkVersionRepository::new(ctx.clone());
    let statuses = ChangeRequestStatusRepository::new(ctx.clone());
    let requests = ChangeRequestRepository::new(ctx.clone());
    let cv_links = ComponentVersionChangeRequestRepository::new(ctx.clone());
    let active = ActiveChangeRequestRepository::new(ctx.clone());

    let tk_141 = toolkits.insert(&ToolKit::new("14.1"))?;
    let tk_142 = toolkits.insert(&ToolKit::new("14.2"))?;
    let sta = components.insert(&Component::new("sta"))?;
    let ess = components.insert(&Component::new("ess"))?;
    let open = statuses.insert(&ChangeRequestStatus::new("Open"))?;
    let closed = statuses.insert(&ChangeRequestStatus::new("Closed"))?;

    let cv_141_sta = versions.insert(&ComponentTkVersion::new(sta.id, tk_141.id))?;
    let cv_141_ess = versions.insert(&ComponentTkVersion::new(ess.id, tk_141.id))?;
    let cv_142_sta = versions.insert(&ComponentTkVersion::new(sta.id, tk_142.id))?;

    let rows = [
        ("CQ00003", &cv_141_sta, open.id, true),
        ("CQ00001", &cv_141_sta, closed.id, false),
        ("CQ00002", &cv_141_ess, open.id, true),
        ("CQ00004", &cv_142_sta, open.id, false),
    ];
    for (cq_id, cv, status_id, is_active) in rows {
        let cr = requests.insert(&ChangeRequest::new(
            cq_id,
            Some(format!("{} description", cq_id)),
            status_id,
        ))?;
        cv_links.insert(cv.id, cr.id)?;
        if is_active {
            active.insert(cv.id, cr.id)?;
        }
    }

    Ok(ReleaseFixture {
        tk_141,
        tk_142,
        sta,
        ess,
        open,
        closed,
        cv_141_sta,
        cv_141_ess,
        cv_142_sta,
    })
}
