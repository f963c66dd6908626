// ==========================================
// 工具包发布库 - 发布关联仓储
// ==========================================
// 表: TK.RELEASEPACKAGE_X_COMPONENT_TK_VERSION / TK.RELEASE_X_PLATFORM
// "发布"即工具包（TOOLKIT_ID）
// ==========================================

use crate::domain::links::{ReleasePackageComponentVersion, ReleasePlatform};
use crate::domain::toolkit::{ComponentTkVersion, Platform, ReleasePackage, ToolKit};
use crate::repository::error::RepositoryResult;
use crate::repository::link::{LinkRepository, LinkRow, LinkSpec};
use std::collections::HashMap;

impl LinkRow for ReleasePackageComponentVersion {
    type Left = ReleasePackage;
    type Right = ComponentTkVersion;

    const SPEC: LinkSpec = LinkSpec {
        entity: "ReleasePackage_Component_Version",
        table: "TK.RELEASEPACKAGE_X_COMPONENT_TK_VERSION",
        left_column: "RELEASEPACKAGE_ID",
        right_column: "COMPONENT_TKVERSION_ID",
    };

    fn from_ids(left: i64, right: i64) -> Self {
        Self {
            release_package_id: left,
            component_version_id: right,
        }
    }

    fn left_id(&self) -> i64 {
        self.release_package_id
    }

    fn right_id(&self) -> i64 {
        self.component_version_id
    }
}

pub type ReleasePackageComponentVersionRepository = LinkRepository<ReleasePackageComponentVersion>;

impl LinkRepository<ReleasePackageComponentVersion> {
    /// 发布包包含的全部组件版本
    pub fn component_versions_for(
        &self,
        release_package_id: i64,
    ) -> RepositoryResult<HashMap<String, ComponentTkVersion>> {
        self.rights_for_left(release_package_id)
    }

    /// 包含该组件版本的全部发布包
    pub fn release_packages_for(
        &self,
        component_version_id: i64,
    ) -> RepositoryResult<HashMap<String, ReleasePackage>> {
        self.lefts_for_right(component_version_id)
    }
}

impl LinkRow for ReleasePlatform {
    type Left = ToolKit;
    type Right = Platform;

    const SPEC: LinkSpec = LinkSpec {
        entity: "Release_Platform",
        table: "TK.RELEASE_X_PLATFORM",
        left_column: "TOOLKIT_ID",
        right_column: "PLATFORM_ID",
    };

    fn from_ids(left: i16, right: i16) -> Self {
        Self {
            toolkit_id: left,
            platform_id: right,
        }
    }

    fn left_id(&self) -> i16 {
        self.toolkit_id
    }

    fn right_id(&self) -> i16 {
        self.platform_id
    }
}

pub type ReleasePlatformRepository = LinkRepository<ReleasePlatform>;

impl LinkRepository<ReleasePlatform> {
    /// 发布支持的全部平台
    pub fn platforms_for(&self, toolkit_id: i16) -> RepositoryResult<HashMap<String, Platform>> {
        self.rights_for_left(toolkit_id)
    }

    /// 支持该平台的全部发布
    pub fn releases_for(&self, platform_id: i16) -> RepositoryResult<HashMap<String, ToolKit>> {
        self.lefts_for_right(platform_id)
    }
}
