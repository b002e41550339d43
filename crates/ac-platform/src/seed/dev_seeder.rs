//! Development Data Seeder
//!
//! Seeds sample data on startup when dev mode is on. Everything goes
//! through the services, so the usual validation applies.
//!
//! Default login: admin@acme.com / DevPassword123

use chrono::NaiveDate;
use tracing::info;

use crate::app::PlatformServices;
use crate::organization::entity::OrganizationInput;
use crate::record::entity::NewRecord;
use crate::right::entity::RightInput;
use crate::role::entity::RoleInput;
use crate::shared::error::Result;
use crate::user::entity::UserCreate;

pub const DEV_ORGANIZATION: &str = "Acme";
pub const DEV_ADMIN_EMAIL: &str = "admin@acme.com";
pub const DEV_PASSWORD: &str = "DevPassword123";
pub const DEV_ADMIN_ROLE: &str = "admin";

const DEV_RIGHTS: &[(&str, &str)] = &[
    ("organizations:manage", "Create, rename and delete organizations"),
    ("users:manage", "Manage user accounts"),
    ("roles:manage", "Manage roles and their rights"),
    ("records:read", "Read epidemiological records"),
];

const DEV_RECORDS: &[(i32, u32, u32, &str, i64, i64, i64)] = &[
    (2020, 3, 1, "Italy", 1694, 34, 83),
    (2020, 3, 1, "Germany", 130, 0, 16),
    (2020, 3, 2, "Italy", 2036, 52, 149),
    (2020, 3, 2, "Germany", 159, 0, 16),
];

/// Development data seeder
pub struct DevDataSeeder {
    services: PlatformServices,
}

impl DevDataSeeder {
    pub fn new(services: PlatformServices) -> Self {
        Self { services }
    }

    /// Seed whatever is missing. Returns false when everything was already there.
    ///
    /// Each step looks its data up first, so a run that failed halfway is
    /// completed by the next one.
    pub async fn seed(&self) -> Result<bool> {
        self.services.users.check_password(DEV_PASSWORD)?;

        let mut created = false;
        let organization_id = match self.services.organizations.get_by_name(DEV_ORGANIZATION).await? {
            Some(organization) => organization.id,
            None => {
                created = true;
                self.services
                    .organizations
                    .create(&OrganizationInput::new(DEV_ORGANIZATION))
                    .await?
                    .id
            }
        };

        let mut right_ids = Vec::with_capacity(DEV_RIGHTS.len());
        for (name, description) in DEV_RIGHTS {
            let id = match self.services.rights.get_by_name(name).await? {
                Some(right) => right.id,
                None => {
                    created = true;
                    self.services
                        .rights
                        .create(&RightInput::new(*name).with_description(*description))
                        .await?
                        .id
                }
            };
            right_ids.push(id);
        }

        let admin_role_id = match self.services.roles.get_by_name(DEV_ADMIN_ROLE).await? {
            Some(role) => role.id,
            None => {
                created = true;
                self.services
                    .roles
                    .create(&RoleInput::new(DEV_ADMIN_ROLE).with_description("Full access"))
                    .await?
                    .id
            }
        };
        self.services.roles.add_rights(admin_role_id, &right_ids).await?;

        let admin_id = match self.services.users.get_by_email(DEV_ADMIN_EMAIL).await? {
            Some(user) => user.id,
            None => {
                created = true;
                self.services
                    .users
                    .create(
                        &UserCreate::new(DEV_ADMIN_EMAIL, organization_id)
                            .with_name("Dev", "Admin")
                            .with_password(DEV_PASSWORD)
                            .with_admin(true),
                    )
                    .await?
                    .id
            }
        };
        self.services.users.add_roles(admin_id, &[admin_role_id]).await?;

        created |= self.seed_records().await?;

        if created {
            info!(email = DEV_ADMIN_EMAIL, password = DEV_PASSWORD, "Development data seeded");
        } else {
            info!("Development data already present, skipping seed");
        }
        Ok(created)
    }

    async fn seed_records(&self) -> Result<bool> {
        if self.services.records.count().await? > 0 {
            return Ok(false);
        }

        let records: Vec<NewRecord> = DEV_RECORDS
            .iter()
            .filter_map(|&(y, m, d, country, cases, deaths, recoveries)| {
                Some(NewRecord {
                    date: NaiveDate::from_ymd_opt(y, m, d)?,
                    country: country.to_string(),
                    cases,
                    deaths,
                    recoveries,
                })
            })
            .collect();

        let imported = self.services.records.import(&records).await?;
        info!(count = imported, "Seeded records");
        Ok(true)
    }
}
