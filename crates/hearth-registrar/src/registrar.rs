//! Core registrar implementation for household flows

use crate::{DirectoryCache, RegistrarError};
use hearth_domain::traits::{ConstituentLookup, HouseholdStore, RelationshipHistory};
use hearth_domain::{
    CanonicalNameSet, Constituent, HouseholdPlan, HouseholdRecord, Person, RelationshipOutcome,
    RelationshipRecord,
};
use hearth_engine::{
    plan_household, recorded_parent_role, resolve_pair, FormatRequest, NameFormatter, NamingConfig,
};

/// Unresolved user input describing one household participant
///
/// Resolution against the directory happens inside the registrar: an
/// account number wins when present, otherwise the name search runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonSpec {
    /// Given name as typed
    pub first_name: String,

    /// Surname as typed
    pub last_name: String,

    /// Declared family role (may be blank)
    pub role: String,

    /// Directory account number, when the caller supplied one
    pub account_number: Option<String>,
}

impl PersonSpec {
    /// Create a spec from typed-in fields
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            role: role.into(),
            account_number: None,
        }
    }

    /// Attach an account number for direct resolution
    pub fn with_account_number(mut self, account_number: impl Into<String>) -> Self {
        self.account_number = Some(account_number.into());
        self
    }

    /// True when both name fields are non-blank
    pub fn has_names(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.last_name.trim().is_empty()
    }
}

/// Registrar configuration
#[derive(Debug, Clone)]
pub struct RegistrarConfig {
    /// Naming conventions passed through to the engine
    pub naming: NamingConfig,

    /// Role assumed for an existing member whose role toward an incoming
    /// child is neither recorded nor supplied
    pub default_member_role: String,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            naming: NamingConfig::default(),
            default_member_role: "father".to_string(),
        }
    }
}

/// Outcome of a household creation flow
#[derive(Debug, Clone)]
pub struct HouseholdCreation {
    /// The stored household record
    pub household: HouseholdRecord,

    /// The plan the household was created from
    pub plan: HouseholdPlan,

    /// Relationships newly recorded
    pub relationships_created: usize,

    /// Relationships the directory already had on file
    pub relationships_existing: usize,

    /// Planned relationships that could not be submitted
    pub relationships_skipped: usize,

    /// Names that matched more than one directory record
    pub duplicate_warnings: Vec<String>,
}

/// Outcome of an add-child or add-spouse flow
#[derive(Debug, Clone)]
pub struct MemberAddition {
    /// The household after the mutation
    pub household: HouseholdRecord,

    /// The attached member, as re-read from the directory
    pub member: Constituent,

    /// New household names, when the flow renamed the household
    pub names: Option<CanonicalNameSet>,

    /// Relationships newly recorded
    pub relationships_created: usize,

    /// Relationships the directory already had on file
    pub relationships_existing: usize,

    /// Relationships that could not be submitted
    pub relationships_skipped: usize,
}

/// Orchestrates household flows against a directory
///
/// Generic over the directory client so flows can run against the real
/// API or the in-memory mock. Reads go through a per-registrar cache that
/// is invalidated after every mutation.
///
/// # Examples
///
/// ```no_run
/// use hearth_registrar::{PersonSpec, Registrar, RegistrarConfig};
/// # async fn example<C>(client: C)
/// # where
/// #     C: hearth_domain::traits::ConstituentLookup
/// #         + hearth_domain::traits::RelationshipHistory
/// #         + hearth_domain::traits::HouseholdStore,
/// #     <C as hearth_domain::traits::ConstituentLookup>::Error: std::fmt::Display,
/// #     <C as hearth_domain::traits::RelationshipHistory>::Error: std::fmt::Display,
/// #     <C as hearth_domain::traits::HouseholdStore>::Error: std::fmt::Display,
/// # {
/// let mut registrar = Registrar::new(client, RegistrarConfig::default());
///
/// let outcome = registrar
///     .create_household(
///         PersonSpec::new("John", "Smith", "husband"),
///         Some(PersonSpec::new("Jane", "Smith", "wife")),
///         vec![PersonSpec::new("Amy", "Smith", "daughter")],
///     )
///     .await
///     .unwrap();
/// println!("{}", outcome.household.full_name);
/// # }
/// ```
pub struct Registrar<C> {
    client: C,
    config: RegistrarConfig,
    cache: DirectoryCache,
}

impl<C> Registrar<C>
where
    C: ConstituentLookup + RelationshipHistory + HouseholdStore,
    <C as ConstituentLookup>::Error: std::fmt::Display,
    <C as RelationshipHistory>::Error: std::fmt::Display,
    <C as HouseholdStore>::Error: std::fmt::Display,
{
    /// Create a registrar over the given directory client
    pub fn new(client: C, config: RegistrarConfig) -> Self {
        Self {
            client,
            config,
            cache: DirectoryCache::new(),
        }
    }

    /// Create a registrar with default configuration
    pub fn default_config(client: C) -> Self {
        Self::new(client, RegistrarConfig::default())
    }

    /// The underlying directory client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Drop every cached directory read
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Resolve person specs and plan a household without writing anything
    ///
    /// Returns the plan and any duplicate-name warnings.
    /// [`create_household`](Self::create_household) runs exactly this
    /// before persisting, so a preview shows the same plan the create flow
    /// would store.
    pub async fn preview_household(
        &mut self,
        first_adult: PersonSpec,
        second_adult: Option<PersonSpec>,
        children: Vec<PersonSpec>,
    ) -> Result<(HouseholdPlan, Vec<String>), RegistrarError> {
        let mut warnings = Vec::new();

        if !first_adult.has_names() {
            return Err(RegistrarError::InvalidInput(
                "The first adult requires both a first and last name".to_string(),
            ));
        }
        let adult1 = self.resolve_spec(&first_adult, &mut warnings).await?;

        // A second adult with blank names is treated as absent
        let adult2 = match second_adult {
            Some(spec) if spec.has_names() => Some(self.resolve_spec(&spec, &mut warnings).await?),
            _ => None,
        };

        let mut resolved_children = Vec::new();
        for spec in &children {
            if !spec.has_names() {
                continue;
            }
            resolved_children.push(self.resolve_spec(spec, &mut warnings).await?);
        }

        Ok((
            plan_household(adult1, adult2, resolved_children, &self.config.naming),
            warnings,
        ))
    }

    /// Create a household from unresolved person specs
    ///
    /// Resolves every spec, plans the household, creates it, recovers
    /// directory ids for newly created members from the stored roster, and
    /// submits every planned relationship. "Already exists" responses count
    /// as success; edges that cannot be submitted are skipped with a
    /// warning rather than failing the flow.
    pub async fn create_household(
        &mut self,
        first_adult: PersonSpec,
        second_adult: Option<PersonSpec>,
        children: Vec<PersonSpec>,
    ) -> Result<HouseholdCreation, RegistrarError> {
        let (plan, warnings) = self
            .preview_household(first_adult, second_adult, children)
            .await?;

        let head = match plan.head() {
            Some(head) => head.clone(),
            None => {
                return Err(RegistrarError::InvalidInput(
                    "A household requires at least one member".to_string(),
                ))
            }
        };

        let record = self
            .client
            .create_household(&plan.names, &head, plan.other_members())
            .await
            .map_err(|e| RegistrarError::Store(e.to_string()))?;

        tracing::info!(
            "Created household {} ({}) with {} members",
            record.id,
            record.full_name,
            plan.members.len()
        );

        let member_ids = self.recover_member_ids(&plan, &record).await?;
        let (created, existing, skipped) = self.submit_edges(&plan, &member_ids).await;

        self.cache.store_household(record.clone());

        Ok(HouseholdCreation {
            household: record,
            plan,
            relationships_created: created,
            relationships_existing: existing,
            relationships_skipped: skipped,
            duplicate_warnings: warnings,
        })
    }

    /// The household roster, head first
    pub async fn household_members(
        &mut self,
        household_id: i64,
    ) -> Result<Vec<Constituent>, RegistrarError> {
        let record = self
            .fetch_household(household_id)
            .await?
            .ok_or(RegistrarError::HouseholdNotFound(household_id))?;

        let mut members = Vec::new();
        if let Some(head_id) = record.head_id {
            match self.fetch_constituent(head_id).await? {
                Some(head) => members.push(head),
                None => tracing::warn!(
                    "Household {} names head {} but the record is missing",
                    household_id,
                    head_id
                ),
            }
        }

        for id in &record.member_ids {
            if Some(*id) == record.head_id {
                continue;
            }
            match self.fetch_constituent(*id).await? {
                Some(member) => members.push(member),
                None => tracing::warn!(
                    "Household {} lists member {} but the record is missing",
                    household_id,
                    id
                ),
            }
        }
        Ok(members)
    }

    /// The household a person currently belongs to
    pub async fn household_of(&mut self, spec: &PersonSpec) -> Result<i64, RegistrarError> {
        let constituent = self.resolve_existing(spec).await?;
        constituent
            .in_household()
            .ok_or_else(|| RegistrarError::NotInHousehold(constituent.display_name()))
    }

    /// Attach an existing constituent to a household as a child
    ///
    /// `member_roles` supplies the role of existing members toward the
    /// child by account id; a parent role already recorded in the directory
    /// wins over it, and members with neither get the configured default.
    /// The attachment is verified by re-reading the constituent before any
    /// relationship is submitted.
    pub async fn add_child(
        &mut self,
        household_id: i64,
        child: PersonSpec,
        member_roles: &[(i64, String)],
    ) -> Result<MemberAddition, RegistrarError> {
        let child_constituent = self.resolve_existing(&child).await?;
        let child_person = Person::new(
            &child_constituent.first_name,
            &child_constituent.last_name,
            &child.role,
        )
        .map_err(RegistrarError::InvalidInput)?
        .with_id(child_constituent.id);

        if child_constituent.in_household() == Some(household_id) {
            return Err(RegistrarError::InvalidInput(format!(
                "{} already belongs to household {}",
                child_person.display_name(),
                household_id
            )));
        }

        let members = self.household_members(household_id).await?;

        // Pair every existing member with the child before mutating anything
        let mut pairings = Vec::new();
        for member in &members {
            let records = self.fetch_relationships(member.id).await?;
            let recorded = recorded_parent_role(&records, member.id);
            let supplied = member_roles
                .iter()
                .find(|(id, _)| *id == member.id)
                .map(|(_, role)| role.as_str());
            let member_role = supplied.unwrap_or(&self.config.default_member_role);
            let (role_member, role_child) =
                resolve_pair(member_role, &child_person.declared_role, recorded.as_deref());
            pairings.push((member.id, role_member, role_child));
        }

        self.client
            .attach_to_household(household_id, &child_constituent)
            .await
            .map_err(|e| RegistrarError::Store(e.to_string()))?;

        let member = self
            .verify_attachment(household_id, child_constituent.id)
            .await?
            .ok_or_else(|| RegistrarError::AttachmentNotConfirmed(child_person.display_name()))?;

        tracing::info!(
            "Attached {} to household {}",
            member.display_name(),
            household_id
        );

        let mut created = 0;
        let mut existing = 0;
        let mut skipped = 0;
        for (member_id, role_member, role_child) in &pairings {
            match self
                .client
                .create_relationship(*member_id, member.id, role_member, role_child)
                .await
            {
                Ok(RelationshipOutcome::Created) => created += 1,
                Ok(RelationshipOutcome::AlreadyExists) => existing += 1,
                Err(e) => {
                    tracing::warn!(
                        "Could not record {}/{} relationship between {} and {}: {}",
                        role_member,
                        role_child,
                        member_id,
                        member.id,
                        e
                    );
                    skipped += 1;
                }
            }
            self.cache.invalidate_relationships(*member_id);
        }

        let household = self
            .fetch_household(household_id)
            .await?
            .ok_or(RegistrarError::HouseholdNotFound(household_id))?;

        Ok(MemberAddition {
            household,
            member,
            names: None,
            relationships_created: created,
            relationships_existing: existing,
            relationships_skipped: skipped,
        })
    }

    /// Attach a spouse to an existing member's household and rename it
    ///
    /// The existing member keeps their position: names are reformatted with
    /// them first and no children, the household record is updated with the
    /// new names and the preserved roster, and one spouse relationship is
    /// submitted.
    pub async fn add_spouse(
        &mut self,
        existing: PersonSpec,
        spouse: PersonSpec,
        spouse_role: &str,
    ) -> Result<MemberAddition, RegistrarError> {
        let spouse_role = spouse_role.trim().to_lowercase();
        let counterpart_role = if spouse_role == "husband" {
            "wife"
        } else {
            "husband"
        };

        let existing_constituent = self.resolve_existing(&existing).await?;
        let household_id = existing_constituent.in_household().ok_or_else(|| {
            RegistrarError::NotInHousehold(existing_constituent.display_name())
        })?;

        let spouse_constituent = self.resolve_existing(&spouse).await?;
        if let Some(other) = spouse_constituent.in_household() {
            return Err(RegistrarError::InvalidInput(format!(
                "{} already belongs to household {}",
                spouse_constituent.display_name(),
                other
            )));
        }

        // The existing member stays first; no head reordering on marriage
        let names = NameFormatter::new(self.config.naming.clone()).format(&FormatRequest {
            first1: &existing_constituent.first_name,
            last1: &existing_constituent.last_name,
            first2: &spouse_constituent.first_name,
            last2: &spouse_constituent.last_name,
            role1: counterpart_role,
            role2: &spouse_role,
            children: &[],
        });

        self.client
            .attach_to_household(household_id, &spouse_constituent)
            .await
            .map_err(|e| RegistrarError::Store(e.to_string()))?;

        let member = self
            .verify_attachment(household_id, spouse_constituent.id)
            .await?
            .ok_or_else(|| {
                RegistrarError::AttachmentNotConfirmed(spouse_constituent.display_name())
            })?;

        let roster = self.household_members(household_id).await?;
        let Some((head, others)) = roster.split_first() else {
            return Err(RegistrarError::HouseholdNotFound(household_id));
        };

        self.client
            .update_household(household_id, &names, head, others)
            .await
            .map_err(|e| RegistrarError::Store(e.to_string()))?;
        self.cache.invalidate_household(household_id);

        tracing::info!(
            "Renamed household {} to \"{}\"",
            household_id,
            names.full_name
        );

        let mut created = 0;
        let mut existing_count = 0;
        let mut skipped = 0;
        match self
            .client
            .create_relationship(
                existing_constituent.id,
                member.id,
                counterpart_role,
                &spouse_role,
            )
            .await
        {
            Ok(RelationshipOutcome::Created) => created += 1,
            Ok(RelationshipOutcome::AlreadyExists) => existing_count += 1,
            Err(e) => {
                tracing::warn!(
                    "Could not record {}/{} relationship between {} and {}: {}",
                    counterpart_role,
                    spouse_role,
                    existing_constituent.id,
                    member.id,
                    e
                );
                skipped += 1;
            }
        }
        self.cache.invalidate_relationships(existing_constituent.id);
        self.cache.invalidate_relationships(member.id);

        let household = self
            .fetch_household(household_id)
            .await?
            .ok_or(RegistrarError::HouseholdNotFound(household_id))?;

        Ok(MemberAddition {
            household,
            member,
            names: Some(names),
            relationships_created: created,
            relationships_existing: existing_count,
            relationships_skipped: skipped,
        })
    }

    /// Resolve one spec against the directory
    ///
    /// An account number wins when present and must match. Otherwise the
    /// name search runs: more than one exact match pushes a duplicate
    /// warning, a match carries the directory's own name casing, and an
    /// unmatched name yields a new (id-less) person.
    async fn resolve_spec(
        &mut self,
        spec: &PersonSpec,
        warnings: &mut Vec<String>,
    ) -> Result<Person, RegistrarError> {
        let person = Person::new(&spec.first_name, &spec.last_name, &spec.role)
            .map_err(RegistrarError::InvalidInput)?;

        if let Some(account) = spec
            .account_number
            .as_deref()
            .filter(|a| !a.trim().is_empty())
        {
            let matched = self
                .client
                .find_by_account_number(account)
                .await
                .map_err(|e| RegistrarError::Lookup(e.to_string()))?
                .ok_or_else(|| RegistrarError::PersonNotFound(format!("account {}", account)))?;
            let resolved = Person::new(&matched.first_name, &matched.last_name, &spec.role)
                .map_err(RegistrarError::InvalidInput)?
                .with_id(matched.id);
            self.cache.store_constituent(matched);
            return Ok(resolved);
        }

        let matches = self
            .client
            .matches_by_name(&person.first_name, &person.last_name)
            .await
            .map_err(|e| RegistrarError::Lookup(e.to_string()))?;
        if matches.len() > 1 {
            let ids: Vec<String> = matches.iter().map(|c| c.id.to_string()).collect();
            let warning = format!(
                "{} directory records match {}: {}",
                matches.len(),
                person.display_name(),
                ids.join(", ")
            );
            tracing::warn!("{}", warning);
            warnings.push(warning);
        }

        let found = self
            .client
            .find_by_name(&person.first_name, &person.last_name)
            .await
            .map_err(|e| RegistrarError::Lookup(e.to_string()))?;
        match found {
            Some(matched) => {
                let resolved = Person::new(&matched.first_name, &matched.last_name, &spec.role)
                    .map_err(RegistrarError::InvalidInput)?
                    .with_id(matched.id);
                self.cache.store_constituent(matched);
                Ok(resolved)
            }
            None => Ok(person),
        }
    }

    /// Resolve a spec that must name an existing directory record
    async fn resolve_existing(&mut self, spec: &PersonSpec) -> Result<Constituent, RegistrarError> {
        if let Some(account) = spec
            .account_number
            .as_deref()
            .filter(|a| !a.trim().is_empty())
        {
            let matched = self
                .client
                .find_by_account_number(account)
                .await
                .map_err(|e| RegistrarError::Lookup(e.to_string()))?
                .ok_or_else(|| RegistrarError::PersonNotFound(format!("account {}", account)))?;
            self.cache.store_constituent(matched.clone());
            return Ok(matched);
        }

        if !spec.has_names() {
            return Err(RegistrarError::InvalidInput(
                "A name or account number is required".to_string(),
            ));
        }

        let matched = self
            .client
            .find_by_name(&spec.first_name, &spec.last_name)
            .await
            .map_err(|e| RegistrarError::Lookup(e.to_string()))?
            .ok_or_else(|| {
                RegistrarError::PersonNotFound(format!(
                    "{} {}",
                    spec.first_name.trim(),
                    spec.last_name.trim()
                ))
            })?;
        self.cache.store_constituent(matched.clone());
        Ok(matched)
    }

    /// Map each planned member to a directory id
    ///
    /// Members matched before creation keep their id. Members the create
    /// call added as new records are recovered from the stored roster by
    /// unique case-insensitive name match; an ambiguous or missing name
    /// leaves the member without an id, and every edge touching them is
    /// skipped.
    async fn recover_member_ids(
        &mut self,
        plan: &HouseholdPlan,
        record: &HouseholdRecord,
    ) -> Result<Vec<Option<i64>>, RegistrarError> {
        let mut roster = Vec::new();
        for id in &record.member_ids {
            match self.fetch_constituent(*id).await? {
                Some(constituent) => roster.push(constituent),
                None => tracing::warn!(
                    "Household {} lists member {} but the record is missing",
                    record.id,
                    id
                ),
            }
        }

        let mut ids = Vec::with_capacity(plan.members.len());
        for member in &plan.members {
            if let Some(id) = member.id {
                ids.push(Some(id));
                continue;
            }

            let matches: Vec<&Constituent> = roster
                .iter()
                .filter(|c| {
                    c.first_name.to_lowercase() == member.first_name.to_lowercase()
                        && c.last_name.to_lowercase() == member.last_name.to_lowercase()
                })
                .collect();
            match matches.as_slice() {
                [single] => ids.push(Some(single.id)),
                [] => {
                    tracing::warn!(
                        "No roster record matches {}; their relationships will be skipped",
                        member.display_name()
                    );
                    ids.push(None);
                }
                _ => {
                    tracing::warn!(
                        "{} roster records match {}; their relationships will be skipped",
                        matches.len(),
                        member.display_name()
                    );
                    ids.push(None);
                }
            }
        }
        Ok(ids)
    }

    /// Submit every planned edge whose endpoints both have ids
    ///
    /// Returns (created, already existing, skipped) counts.
    async fn submit_edges(
        &self,
        plan: &HouseholdPlan,
        member_ids: &[Option<i64>],
    ) -> (usize, usize, usize) {
        let mut created = 0;
        let mut existing = 0;
        let mut skipped = 0;

        for edge in &plan.edges {
            let a_id = member_ids.get(edge.a).copied().flatten();
            let b_id = member_ids.get(edge.b).copied().flatten();
            let (Some(a_id), Some(b_id)) = (a_id, b_id) else {
                skipped += 1;
                continue;
            };

            match self
                .client
                .create_relationship(a_id, b_id, &edge.role_a_to_b, &edge.role_b_to_a)
                .await
            {
                Ok(RelationshipOutcome::Created) => created += 1,
                Ok(RelationshipOutcome::AlreadyExists) => {
                    tracing::debug!(
                        "Relationship between {} and {} already on file",
                        a_id,
                        b_id
                    );
                    existing += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        "Could not record {}/{} relationship between {} and {}: {}",
                        edge.role_a_to_b,
                        edge.role_b_to_a,
                        a_id,
                        b_id,
                        e
                    );
                    skipped += 1;
                }
            }
        }

        (created, existing, skipped)
    }

    /// Re-read a constituent after an attachment and confirm the membership
    ///
    /// The read bypasses the cache, and both the constituent and the
    /// household are invalidated so later reads observe the new roster.
    /// Returns `None` when the directory accepted the update but the
    /// record still shows no membership.
    async fn verify_attachment(
        &mut self,
        household_id: i64,
        constituent_id: i64,
    ) -> Result<Option<Constituent>, RegistrarError> {
        self.cache.invalidate_constituent(constituent_id);
        self.cache.invalidate_household(household_id);

        let fresh = self
            .client
            .constituent(constituent_id)
            .await
            .map_err(|e| RegistrarError::Lookup(e.to_string()))?;

        match fresh {
            Some(constituent) if constituent.in_household() == Some(household_id) => {
                self.cache.store_constituent(constituent.clone());
                Ok(Some(constituent))
            }
            _ => Ok(None),
        }
    }

    async fn fetch_constituent(
        &mut self,
        id: i64,
    ) -> Result<Option<Constituent>, RegistrarError> {
        if let Some(constituent) = self.cache.constituent(id) {
            return Ok(Some(constituent.clone()));
        }
        let fetched = self
            .client
            .constituent(id)
            .await
            .map_err(|e| RegistrarError::Lookup(e.to_string()))?;
        if let Some(constituent) = &fetched {
            self.cache.store_constituent(constituent.clone());
        }
        Ok(fetched)
    }

    async fn fetch_household(
        &mut self,
        id: i64,
    ) -> Result<Option<HouseholdRecord>, RegistrarError> {
        if let Some(record) = self.cache.household(id) {
            return Ok(Some(record.clone()));
        }
        let fetched = self
            .client
            .household(id)
            .await
            .map_err(|e| RegistrarError::Lookup(e.to_string()))?;
        if let Some(record) = &fetched {
            self.cache.store_household(record.clone());
        }
        Ok(fetched)
    }

    async fn fetch_relationships(
        &mut self,
        constituent_id: i64,
    ) -> Result<Vec<RelationshipRecord>, RegistrarError> {
        if let Some(records) = self.cache.relationships(constituent_id) {
            return Ok(records.to_vec());
        }
        let records = self
            .client
            .relationships(constituent_id)
            .await
            .map_err(|e| RegistrarError::Lookup(e.to_string()))?;
        self.cache.store_relationships(constituent_id, records.clone());
        Ok(records)
    }
}
