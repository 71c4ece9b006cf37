//! Servers hosted on the core platform.

use super::{
    AccessService, AdminSelector, CohortRef, Credentials, LocalRepository, OptionsSpec,
    PlatformSelector, RepositoryKind, RepositoryProfile, ServerDefinition, ServerRole,
    ZoneOptions,
};

const MANUFACTURING: OptionsSpec = OptionsSpec::Zones(ZoneOptions {
    supported: &["manufacturing"],
    default: &["manufacturing"],
    publish: &[],
});

const fn service(name: &'static str, options: OptionsSpec) -> AccessService {
    AccessService { name, options }
}

/// `cocoMDS2`, `cocoMDS5` and `cocoMDS6`, in configuration order.
pub static CORE_SERVERS: [ServerDefinition; 3] = [
    ServerDefinition {
        name: "cocoMDS2",
        platform: PlatformSelector::Session,
        admin: AdminSelector::Session,
        credentials: Credentials::Own,
        role: ServerRole::MetadataRepository(RepositoryProfile {
            description: "Governance Server",
            repository: Some(LocalRepository {
                kind: RepositoryKind::XtdbLocalKv,
                collection_name: "Governance Catalog",
            }),
            cohorts: &[CohortRef::Coco, CohortRef::Dev, CohortRef::Iot],
            access_services: &[
                service("asset-consumer", OptionsSpec::Empty),
                service("asset-owner", OptionsSpec::Empty),
                service("community-profile", OptionsSpec::KarmaPoints),
                service("governance-engine", OptionsSpec::Empty),
                service("governance-server", OptionsSpec::Empty),
                service("governance-program", OptionsSpec::Empty),
                service("digital-architecture", OptionsSpec::Empty),
                service("security-manager", OptionsSpec::Empty),
                service("asset-lineage", OptionsSpec::Empty),
                service("it-infrastructure", OptionsSpec::Empty),
                service("project-management", OptionsSpec::Empty),
            ],
            startup_archive: Some("content-packs/CoreContentPack.omarchive"),
        }),
    },
    ServerDefinition {
        name: "cocoMDS5",
        platform: PlatformSelector::Session,
        admin: AdminSelector::Session,
        credentials: Credentials::Own,
        role: ServerRole::MetadataRepository(RepositoryProfile {
            description: "Business Systems",
            repository: Some(LocalRepository {
                kind: RepositoryKind::ReadOnlyProxy,
                collection_name: "Business Systems Catalog",
            }),
            cohorts: &[CohortRef::Coco],
            access_services: &[],
            startup_archive: None,
        }),
    },
    // Always edited on the configured core platform as the configured admin.
    ServerDefinition {
        name: "cocoMDS6",
        platform: PlatformSelector::Core,
        admin: AdminSelector::Configured,
        credentials: Credentials::Own,
        role: ServerRole::MetadataRepository(RepositoryProfile {
            description: "Manufacturing",
            repository: Some(LocalRepository {
                kind: RepositoryKind::XtdbLocalKv,
                collection_name: "Manufacturing Catalog",
            }),
            cohorts: &[CohortRef::Coco, CohortRef::Iot],
            access_services: &[
                service("asset-consumer", MANUFACTURING),
                service("asset-owner", MANUFACTURING),
                service("community-profile", OptionsSpec::KarmaPoints),
                service("data-science", MANUFACTURING),
                service("asset-manager", MANUFACTURING),
                service("governance-engine", MANUFACTURING),
                service("governance-server", MANUFACTURING),
                service("data-manager", MANUFACTURING),
                service("it-infrastructure", MANUFACTURING),
                service("project-management", MANUFACTURING),
            ],
            startup_archive: None,
        }),
    },
];
