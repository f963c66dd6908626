// ==========================================
// 关联表集成测试
// ==========================================
// 测试目标: 关联行往返、批量查询键、外键按需加载
// ==========================================

mod test_helpers;

use tk_dao::domain::{
    CodeUpdate, DeliverableUpdate, DeliverableUpdateStatusName, Event, EventName, FileContent,
    Platform,
};
use tk_dao::repository::{
    CodeUpdateChangeRequestRepository, CodeUpdateRepository, DeliverableUpdateRepository,
    DeliverableUpdateStatusNameRepository, EventNameRepository, EventsRepository,
    FileContentRepository, FileNameRepository, LinkRow, PlatformRepository,
    ReleasePlatformRepository, ChangeRequestRepository,
};

#[test]
fn test_code_update_change_request_round_trip() {
    let (_dir, ctx) = test_helpers::create_test_context("dev").unwrap();
    let fx = test_helpers::seed_release_data(&ctx).unwrap();

    let cr = ChangeRequestRepository::new(ctx.clone()).get_by_name("CQ00003").unwrap();
    let cu = CodeUpdateRepository::new(ctx.clone())
        .insert(&CodeUpdate::new(fx.cv_141_sta.id, "r2048"))
        .unwrap();

    let links = CodeUpdateChangeRequestRepository::new(ctx);
    let link = links.insert(cu.id, cr.id).unwrap();
    assert_eq!(link.identity(), format!("{}-{}", cu.id, cr.id));
    assert_eq!(links.get(cu.id, cr.id).unwrap(), link);

    let found = links.change_requests_for(cu.id).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found.get(&cr.id.to_string()).map(|c| c.id), Some(cr.id));
}

#[test]
fn test_release_platform_bulk_lookup() {
    let (_dir, ctx) = test_helpers::create_test_context("dev").unwrap();
    let fx = test_helpers::seed_release_data(&ctx).unwrap();

    let platforms = PlatformRepository::new(ctx.clone());
    let rhel = platforms.insert(&Platform::new("64-rhel")).unwrap();
    let win = platforms.insert(&Platform::new("64-win")).unwrap();

    let links = ReleasePlatformRepository::new(ctx.clone());
    links.insert(fx.tk_141.id, rhel.id).unwrap();
    links.insert(fx.tk_141.id, win.id).unwrap();
    links.insert(fx.tk_142.id, rhel.id).unwrap();

    let for_141 = links.platforms_for(fx.tk_141.id).unwrap();
    let mut names: Vec<_> = for_141.values().map(|p| p.name.clone()).collect();
    names.sort();
    assert_eq!(names, vec!["64-rhel", "64-win"]);

    assert_eq!(links.releases_for(rhel.id).unwrap().len(), 2);

    // 软删除的平台不再出现在批量查询里
    platforms.delete(win.id).unwrap();
    assert_eq!(links.platforms_for(fx.tk_141.id).unwrap().len(), 1);
}

#[test]
fn test_lazy_foreign_keys() {
    let (_dir, ctx) = test_helpers::create_test_context("dev").unwrap();

    let platform = PlatformRepository::new(ctx.clone())
        .insert(&Platform::new("64-rhel"))
        .unwrap();
    let status = DeliverableUpdateStatusNameRepository::new(ctx.clone())
        .insert(&DeliverableUpdateStatusName::new("STAGED"))
        .unwrap();
    let deliverables = DeliverableUpdateRepository::new(ctx.clone());
    let du = deliverables
        .insert(&DeliverableUpdate::new(platform.id, Some(status.id)))
        .unwrap();
    assert_eq!(deliverables.platform(&du).unwrap(), platform);
    assert_eq!(deliverables.current_status(&du).unwrap(), Some(status));

    let name = EventNameRepository::new(ctx.clone())
        .insert(&EventName::new("SHIP", None))
        .unwrap();
    let events = EventsRepository::new(ctx.clone());
    let ev = events.insert(&Event::new(name.id, None)).unwrap();
    assert_eq!(events.event_name(&ev).unwrap(), name);

    let file = FileNameRepository::new(ctx.clone()).get_or_insert("bin/sta").unwrap();
    let contents = FileContentRepository::new(ctx);
    let fc = contents
        .insert(&FileContent::new(file.id, "sha1:00ff", Some(vec![0, 255])))
        .unwrap();
    assert_eq!(contents.file_name(&fc).unwrap(), file);
}
