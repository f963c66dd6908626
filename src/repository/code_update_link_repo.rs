// ==========================================
// 工具包发布库 - 代码更新关联仓储
// ==========================================
// 表: TK.CODEUPDATE_X_CHANGEREQUEST / TK.CODEUPDATE_X_FUNCTIONALUPDATE
// 无代理主键，身份为 "<代码更新 id>-<另一端 id>"
// ==========================================

use crate::domain::change_request::{ChangeRequest, CodeUpdate, FunctionalUpdate};
use crate::domain::links::{CodeUpdateChangeRequest, CodeUpdateFunctionalUpdate};
use crate::repository::error::RepositoryResult;
use crate::repository::link::{LinkRepository, LinkRow, LinkSpec};
use std::collections::HashMap;

impl LinkRow for CodeUpdateChangeRequest {
    type Left = CodeUpdate;
    type Right = ChangeRequest;

    const SPEC: LinkSpec = LinkSpec {
        entity: "CodeUpdate_ChangeRequest",
        table: "TK.CODEUPDATE_X_CHANGEREQUEST",
        left_column: "CODEUPDATE_ID",
        right_column: "CHANGEREQUEST_ID",
    };

    fn from_ids(left: i64, right: i64) -> Self {
        Self {
            code_update_id: left,
            change_request_id: right,
        }
    }

    fn left_id(&self) -> i64 {
        self.code_update_id
    }

    fn right_id(&self) -> i64 {
        self.change_request_id
    }
}

pub type CodeUpdateChangeRequestRepository = LinkRepository<CodeUpdateChangeRequest>;

impl LinkRepository<CodeUpdateChangeRequest> {
    /// 代码更新关联的全部变更请求
    pub fn change_requests_for(
        &self,
        code_update_id: i64,
    ) -> RepositoryResult<HashMap<String, ChangeRequest>> {
        self.rights_for_left(code_update_id)
    }

    /// 变更请求关联的全部代码更新
    pub fn code_updates_for(
        &self,
        change_request_id: i64,
    ) -> RepositoryResult<HashMap<String, CodeUpdate>> {
        self.lefts_for_right(change_request_id)
    }
}

impl LinkRow for CodeUpdateFunctionalUpdate {
    type Left = CodeUpdate;
    type Right = FunctionalUpdate;

    const SPEC: LinkSpec = LinkSpec {
        entity: "CodeUpdate_FunctionalUpdate",
        table: "TK.CODEUPDATE_X_FUNCTIONALUPDATE",
        left_column: "CODEUPDATE_ID",
        right_column: "FUNCTIONALUPDATE_ID",
    };

    fn from_ids(left: i64, right: i64) -> Self {
        Self {
            code_update_id: left,
            functional_update_id: right,
        }
    }

    fn left_id(&self) -> i64 {
        self.code_update_id
    }

    fn right_id(&self) -> i64 {
        self.functional_update_id
    }
}

pub type CodeUpdateFunctionalUpdateRepository = LinkRepository<CodeUpdateFunctionalUpdate>;

impl LinkRepository<CodeUpdateFunctionalUpdate> {
    /// 代码更新关联的全部功能更新
    pub fn functional_updates_for(
        &self,
        code_update_id: i64,
    ) -> RepositoryResult<HashMap<String, FunctionalUpdate>> {
        self.rights_for_left(code_update_id)
    }

    /// 功能更新关联的全部代码更新
    pub fn code_updates_for(
        &self,
        functional_update_id: i64,
    ) -> RepositoryResult<HashMap<String, CodeUpdate>> {
        self.lefts_for_right(functional_update_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TkContext;
    use crate::domain::change_request::ChangeRequestStatus;
    use crate::domain::toolkit::{Component, ComponentTkVersion, ToolKit};
    use crate::repository::change_request_repo::{
        ChangeRequestRepository, ChangeRequestStatusRepository, CodeUpdateRepository,
    };
    use crate::repository::functional_update_repo::FunctionalUpdateRepository;
    use crate::repository::toolkit_repo::{
        ComponentRepository, ComponentTkVersionRepository, ToolKitRepository,
    };
    use crate::repository::RepositoryError;
    use std::sync::Arc;

    struct Fixture {
        ctx: Arc<TkContext>,
        code_update: CodeUpdate,
        cr_a: ChangeRequest,
        cr_b: ChangeRequest,
    }

    fn fixture() -> Fixture {
        let ctx = TkContext::in_memory("tester").unwrap();
        let tk = ToolKitRepository::new(ctx.clone()).insert(&ToolKit::new("14.1")).unwrap();
        let comp = ComponentRepository::new(ctx.clone())
            .insert(&Component::new("sta"))
            .unwrap();
        let cv = ComponentTkVersionRepository::new(ctx.clone())
            .insert(&ComponentTkVersion::new(comp.id, tk.id))
            .unwrap();
        let status = ChangeRequestStatusRepository::new(ctx.clone())
            .insert(&ChangeRequestStatus::new("Open"))
            .unwrap();
        let crs = ChangeRequestRepository::new(ctx.clone());
        let cr_a = crs.insert(&ChangeRequest::new("CQ100", None, status.id)).unwrap();
        let cr_b = crs.insert(&ChangeRequest::new("CQ200", None, status.id)).unwrap();
        let code_update = CodeUpdateRepository::new(ctx.clone())
            .insert(&CodeUpdate::new(cv.id, "r1024"))
            .unwrap();

        Fixture {
            ctx,
            code_update,
            cr_a,
            cr_b,
        }
    }

    #[test]
    fn test_association_round_trip() {
        let f = fixture();
        let repo = CodeUpdateChangeRequestRepository::new(f.ctx.clone());

        let link = repo.insert(f.code_update.id, f.cr_a.id).unwrap();
        assert_eq!(link.identity(), format!("{}-{}", f.code_update.id, f.cr_a.id));

        let crs = repo.change_requests_for(f.code_update.id).unwrap();
        assert_eq!(crs.len(), 1);
        assert_eq!(crs[&f.cr_a.id.to_string()].id, f.cr_a.id);

        let cus = repo.code_updates_for(f.cr_a.id).unwrap();
        assert_eq!(cus.keys().cloned().collect::<Vec<_>>(), vec![f.code_update.id.to_string()]);
    }

    #[test]
    fn test_update_right_moves_link() {
        let f = fixture();
        let repo = CodeUpdateChangeRequestRepository::new(f.ctx.clone());

        let mut link = repo.insert(f.code_update.id, f.cr_a.id).unwrap();
        repo.update_right(&mut link, f.cr_b.id).unwrap();

        assert_eq!(link.change_request_id, f.cr_b.id);
        assert!(!repo.exists(f.code_update.id, f.cr_a.id).unwrap());
        assert!(repo.exists(f.code_update.id, f.cr_b.id).unwrap());
    }

    #[test]
    fn test_delete_and_missing_pair() {
        let f = fixture();
        let repo = CodeUpdateChangeRequestRepository::new(f.ctx.clone());

        repo.insert(f.code_update.id, f.cr_a.id).unwrap();
        repo.delete(f.code_update.id, f.cr_a.id).unwrap();

        assert!(repo.find(f.code_update.id, f.cr_a.id).unwrap().is_none());
        assert!(repo.get(f.code_update.id, f.cr_a.id).unwrap_err().is_not_found());
        assert!(matches!(
            repo.delete(f.code_update.id, f.cr_a.id).unwrap_err(),
            RepositoryError::WriteFailed { .. }
        ));
    }

    #[test]
    fn test_soft_deleted_change_request_excluded_from_bulk_lookup() {
        let f = fixture();
        let repo = CodeUpdateChangeRequestRepository::new(f.ctx.clone());
        repo.insert(f.code_update.id, f.cr_a.id).unwrap();
        repo.insert(f.code_update.id, f.cr_b.id).unwrap();

        ChangeRequestRepository::new(f.ctx.clone()).delete(f.cr_b.id).unwrap();

        let crs = repo.change_requests_for(f.code_update.id).unwrap();
        assert_eq!(crs.len(), 1);
        assert!(crs.contains_key(&f.cr_a.id.to_string()));
        assert_eq!(repo.list_by_left(f.code_update.id).unwrap().len(), 2);
    }

    #[test]
    fn test_functional_update_links() {
        let f = fixture();
        let fu = FunctionalUpdateRepository::new(f.ctx.clone())
            .insert(&FunctionalUpdate::new("new timing engine"))
            .unwrap();
        let repo = CodeUpdateFunctionalUpdateRepository::new(f.ctx.clone());

        repo.insert(f.code_update.id, fu.id).unwrap();
        let fus = repo.functional_updates_for(f.code_update.id).unwrap();
        assert_eq!(fus[&fu.id.to_string()].description, "new timing engine");
        assert_eq!(repo.code_updates_for(fu.id).unwrap().len(), 1);
        assert_eq!(repo.list_by_right(fu.id).unwrap()[0].code_update_id, f.code_update.id);
    }
}
