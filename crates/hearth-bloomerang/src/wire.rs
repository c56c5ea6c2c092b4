//! Wire types for the Bloomerang REST API
//!
//! Bloomerang's JSON uses PascalCase keys; these DTOs keep the serde layer
//! at the crate boundary so domain types never carry serialization
//! attributes. List endpoints wrap their items in a `Results` envelope.

use hearth_domain::{CanonicalNameSet, Constituent, HouseholdRecord, Person, RelationshipRecord};
use serde::{Deserialize, Serialize};

/// Envelope returned by the search and relationship list endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct ResultsPage<T> {
    #[serde(rename = "Results", default = "Vec::new")]
    pub results: Vec<T>,
}

/// Constituent record as returned by the directory
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ConstituentDto {
    pub id: i64,
    pub account_number: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub middle_name: Option<String>,
    pub gender: Option<String>,
    pub birthdate: Option<String>,
    pub household_id: Option<i64>,
}

impl From<ConstituentDto> for Constituent {
    fn from(dto: ConstituentDto) -> Self {
        Constituent {
            id: dto.id,
            account_number: dto.account_number,
            first_name: dto.first_name,
            last_name: dto.last_name,
            middle_name: dto.middle_name,
            gender: dto.gender,
            birthdate: dto.birthdate,
            household_id: dto.household_id,
        }
    }
}

/// Household record as returned by the directory
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct HouseholdDto {
    pub id: i64,
    #[serde(default)]
    pub full_name: String,
    pub head_id: Option<i64>,
    #[serde(default)]
    pub member_ids: Vec<i64>,
}

impl From<HouseholdDto> for HouseholdRecord {
    fn from(dto: HouseholdDto) -> Self {
        HouseholdRecord {
            id: dto.id,
            full_name: dto.full_name,
            head_id: dto.head_id,
            member_ids: dto.member_ids,
        }
    }
}

/// One recorded relationship as returned by the directory
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RelationshipDto {
    pub account_id_1: i64,
    pub account_id_2: i64,
    #[serde(default)]
    pub role_1: String,
    #[serde(default)]
    pub role_2: String,
}

impl From<RelationshipDto> for RelationshipRecord {
    fn from(dto: RelationshipDto) -> Self {
        RelationshipRecord {
            account_id_1: dto.account_id_1,
            account_id_2: dto.account_id_2,
            role_1: dto.role_1,
            role_2: dto.role_2,
        }
    }
}

/// Constituent body inside household create/update payloads
///
/// `id` is present only for constituents that already exist; omitting it
/// makes the directory create a new record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ConstituentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "Type")]
    pub record_type: &'static str,
    pub status: &'static str,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
}

impl ConstituentPayload {
    pub fn from_person(person: &Person) -> Self {
        Self {
            id: person.id.filter(|id| *id > 0),
            record_type: "Individual",
            status: "Active",
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            middle_name: None,
            gender: None,
            birthdate: None,
        }
    }

    // Known demographics ride along so a roster rewrite never erases them
    pub fn from_constituent(constituent: &Constituent) -> Self {
        Self {
            id: Some(constituent.id),
            record_type: "Individual",
            status: "Active",
            first_name: constituent.first_name.clone(),
            last_name: constituent.last_name.clone(),
            middle_name: constituent.middle_name.clone(),
            gender: constituent.gender.clone(),
            birthdate: constituent.birthdate.clone(),
        }
    }
}

/// Household create/update payload: the six names plus the roster
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct HouseholdPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub full_name: String,
    pub sort_name: String,
    pub informal_name: String,
    pub formal_name: String,
    pub envelope_name: String,
    pub recognition_name: String,
    pub head: ConstituentPayload,
    pub members: Vec<ConstituentPayload>,
}

impl HouseholdPayload {
    pub fn new(
        id: Option<i64>,
        names: &CanonicalNameSet,
        head: ConstituentPayload,
        members: Vec<ConstituentPayload>,
    ) -> Self {
        Self {
            id,
            full_name: names.full_name.clone(),
            sort_name: names.sort_name.clone(),
            informal_name: names.informal_name.clone(),
            formal_name: names.formal_name.clone(),
            envelope_name: names.envelope_name.clone(),
            recognition_name: names.recognition_name.clone(),
            head,
            members,
        }
    }
}

/// Payload for attaching a constituent to a household via constituent update
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AttachPayload {
    pub id: i64,
    #[serde(rename = "Type")]
    pub record_type: &'static str,
    pub status: &'static str,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    pub household_id: i64,
}

impl AttachPayload {
    pub fn new(constituent: &Constituent, household_id: i64) -> Self {
        Self {
            id: constituent.id,
            record_type: "Individual",
            status: "Active",
            first_name: constituent.first_name.clone(),
            last_name: constituent.last_name.clone(),
            middle_name: constituent.middle_name.clone(),
            gender: constituent.gender.clone(),
            birthdate: constituent.birthdate.clone(),
            household_id,
        }
    }
}

/// Relationship submission payload, by role id
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RelationshipPayload {
    pub account_id_1: i64,
    pub account_id_2: i64,
    pub relationship_role_id_1: u32,
    pub relationship_role_id_2: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_search_page() {
        let body = json!({
            "Total": 2,
            "ResultCount": 2,
            "Results": [
                {
                    "Id": 101,
                    "AccountNumber": 1234,
                    "FirstName": "Mary",
                    "LastName": "Jones",
                    "HouseholdId": 55
                },
                {
                    "Id": 102,
                    "FirstName": "Mary",
                    "LastName": "Jonas"
                }
            ]
        });

        let page: ResultsPage<ConstituentDto> = serde_json::from_value(body).unwrap();
        assert_eq!(page.results.len(), 2);

        let first = Constituent::from(page.results[0].clone());
        assert_eq!(first.id, 101);
        assert_eq!(first.account_number, Some(1234));
        assert_eq!(first.household_id, Some(55));

        let second = Constituent::from(page.results[1].clone());
        assert_eq!(second.account_number, None);
        assert_eq!(second.household_id, None);
    }

    #[test]
    fn test_parse_page_without_results_key() {
        let page: ResultsPage<ConstituentDto> = serde_json::from_value(json!({})).unwrap();
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_parse_household() {
        let body = json!({
            "Id": 55,
            "FullName": "The John Smith Family",
            "HeadId": 101,
            "MemberIds": [101, 102, 103]
        });

        let record = HouseholdRecord::from(serde_json::from_value::<HouseholdDto>(body).unwrap());
        assert_eq!(record.id, 55);
        assert_eq!(record.head_id, Some(101));
        assert_eq!(record.member_ids, vec![101, 102, 103]);
    }

    #[test]
    fn test_parse_relationship_list() {
        let body = json!({
            "Results": [
                {"AccountId1": 101, "AccountId2": 102, "Role1": "Husband", "Role2": "Wife"}
            ]
        });

        let page: ResultsPage<RelationshipDto> = serde_json::from_value(body).unwrap();
        let record = RelationshipRecord::from(page.results[0].clone());
        assert_eq!(record.account_id_1, 101);
        assert_eq!(record.role_2, "Wife");
    }

    #[test]
    fn test_member_payload_omits_missing_id() {
        let person = Person::new("Amy", "Jones", "daughter").unwrap();
        let value = serde_json::to_value(ConstituentPayload::from_person(&person)).unwrap();

        assert!(value.get("Id").is_none());
        assert_eq!(value["Type"], "Individual");
        assert_eq!(value["Status"], "Active");
        assert_eq!(value["FirstName"], "Amy");
        assert_eq!(value["LastName"], "Jones");
    }

    #[test]
    fn test_member_payload_keeps_existing_id() {
        let person = Person::new("Amy", "Jones", "daughter").unwrap().with_id(42);
        let value = serde_json::to_value(ConstituentPayload::from_person(&person)).unwrap();
        assert_eq!(value["Id"], 42);
    }

    #[test]
    fn test_household_payload_shape() {
        let names = CanonicalNameSet::new(
            "The Jones Family",
            "Jones, Mary",
            "Mary",
            "Ms. Jones",
            "Mary Jones",
            "Ms. Mary Jones",
        );
        let head = Person::new("Mary", "Jones", "mother").unwrap().with_id(101);
        let payload = HouseholdPayload::new(
            None,
            &names,
            ConstituentPayload::from_person(&head),
            vec![ConstituentPayload::from_person(
                &Person::new("Amy", "Jones", "daughter").unwrap(),
            )],
        );

        let value = serde_json::to_value(payload).unwrap();
        assert!(value.get("Id").is_none());
        assert_eq!(value["FullName"], "The Jones Family");
        assert_eq!(value["RecognitionName"], "Ms. Mary Jones");
        assert_eq!(value["Head"]["Id"], 101);
        assert_eq!(value["Members"][0]["FirstName"], "Amy");
        assert!(value["Members"][0].get("Id").is_none());
    }

    #[test]
    fn test_relationship_payload_shape() {
        let payload = RelationshipPayload {
            account_id_1: 101,
            account_id_2: 102,
            relationship_role_id_1: 21,
            relationship_role_id_2: 18,
        };

        let value = serde_json::to_value(payload).unwrap();
        assert_eq!(value["AccountId1"], 101);
        assert_eq!(value["AccountId2"], 102);
        assert_eq!(value["RelationshipRoleId1"], 21);
        assert_eq!(value["RelationshipRoleId2"], 18);
    }

    #[test]
    fn test_attach_payload_shape() {
        let constituent = Constituent {
            id: 77,
            account_number: None,
            first_name: "Ben".to_string(),
            last_name: "Reed".to_string(),
            middle_name: None,
            gender: None,
            birthdate: None,
            household_id: None,
        };

        let value = serde_json::to_value(AttachPayload::new(&constituent, 55)).unwrap();
        assert_eq!(value["Id"], 77);
        assert_eq!(value["HouseholdId"], 55);
        assert_eq!(value["Type"], "Individual");
        assert!(value.get("Gender").is_none());
    }

    #[test]
    fn test_roster_payload_keeps_demographics() {
        let constituent = Constituent {
            id: 77,
            account_number: Some(9001),
            first_name: "Ben".to_string(),
            last_name: "Reed".to_string(),
            middle_name: Some("A".to_string()),
            gender: Some("Male".to_string()),
            birthdate: Some("1985-02-11".to_string()),
            household_id: None,
        };

        let value = serde_json::to_value(ConstituentPayload::from_constituent(&constituent)).unwrap();
        assert_eq!(value["MiddleName"], "A");
        assert_eq!(value["Gender"], "Male");
        assert_eq!(value["Birthdate"], "1985-02-11");
    }
}
