use chrono::{NaiveDate, NaiveTime};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

/// A persisted entity whose identifier is allocated by the store.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Copy + Eq + Ord + From<i64> + Into<i64> + fmt::Debug + fmt::Display + Send + Sync;
    type Draft: Clone + Send + Sync;

    /// Human name used in errors and logs.
    const NAME: &'static str;
    /// Table name used by persistent stores.
    const TABLE: &'static str;

    fn id(&self) -> Self::Id;

    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;
}

macro_rules! record_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(ContactId);
record_id!(AppointmentId);

pub const NAME_MAX_LENGTH: usize = 100;
pub const SUBJECT_MAX_LENGTH: usize = 100;
pub const FULL_NAME_MAX_LENGTH: usize = 100;
pub const PHONE_MAX_LENGTH: usize = 15;

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

/// A contact-form submission as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl NewContact {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub contact_id: ContactId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactRecord {
    pub fn to_draft(&self) -> NewContact {
        NewContact {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
        }
    }
}

impl Entity for ContactRecord {
    type Id = ContactId;
    type Draft = NewContact;

    const NAME: &'static str = "Contact";
    const TABLE: &'static str = "rose_contact";

    fn id(&self) -> ContactId {
        self.contact_id
    }

    fn from_draft(contact_id: ContactId, draft: NewContact) -> Self {
        Self {
            contact_id,
            name: draft.name,
            email: draft.email,
            subject: draft.subject,
            message: draft.message,
        }
    }
}

impl fmt::Display for ContactRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ---------------------------------------------------------------------------
// Appointment
// ---------------------------------------------------------------------------

/// An appointment booking as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub time: NaiveTime,
}

impl NewAppointment {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
            date,
            time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: AppointmentId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub time: NaiveTime,
}

impl AppointmentRecord {
    pub fn to_draft(&self) -> NewAppointment {
        NewAppointment {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            date: self.date,
            time: self.time,
        }
    }
}

impl Entity for AppointmentRecord {
    type Id = AppointmentId;
    type Draft = NewAppointment;

    const NAME: &'static str = "Appointment";
    const TABLE: &'static str = "rose_appointment";

    fn id(&self) -> AppointmentId {
        self.id
    }

    fn from_draft(id: AppointmentId, draft: NewAppointment) -> Self {
        Self {
            id,
            full_name: draft.full_name,
            email: draft.email,
            phone: draft.phone,
            date: draft.date,
            time: draft.time,
        }
    }
}

impl fmt::Display for AppointmentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Appointment for {} on {}", self.full_name, self.date)
    }
}

/// `HH:MM` or `HH:MM:SS[.fff]` in, `HH:MM:SS[.fff]` out.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const INPUT_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

    pub fn parse(value: &str) -> Option<NaiveTime> {
        INPUT_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M:%S%.f"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            de::Error::custom(format!("invalid time `{}`, expected HH:MM or HH:MM:SS", raw))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_appointment() -> AppointmentRecord {
        AppointmentRecord::from_draft(
            AppointmentId(3),
            NewAppointment::new(
                "Ann Lee",
                "ann@x.com",
                "0912345678",
                NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
                NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            ),
        )
    }

    #[test]
    fn test_contact_display_is_name() {
        let record = ContactRecord::from_draft(
            ContactId(1),
            NewContact::new("Ann", "ann@x.com", "Hi", "Hello"),
        );
        assert_eq!(record.to_string(), "Ann");
        assert_eq!(record.id(), ContactId(1));
    }

    #[test]
    fn test_appointment_display_uses_date() {
        assert_eq!(
            sample_appointment().to_string(),
            "Appointment for Ann Lee on 2024-05-17"
        );
    }

    #[test]
    fn test_contact_json_field_names() {
        let record = ContactRecord::from_draft(
            ContactId(2),
            NewContact::new("Bo", "bo@x.com", "Re", "Body"),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "contact_id": 2,
                "name": "Bo",
                "email": "bo@x.com",
                "subject": "Re",
                "message": "Body"
            })
        );
    }

    #[test]
    fn test_appointment_json_shape() {
        let value = serde_json::to_value(sample_appointment()).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["date"], "2024-05-17");
        assert_eq!(value["time"], "14:30:00");
    }

    #[test]
    fn test_appointment_payload_accepts_short_time() {
        let draft: NewAppointment = serde_json::from_str(
            r#"{"full_name":"Ann","email":"a@b.com","phone":"123","date":"2024-05-17","time":"09:05"}"#,
        )
        .unwrap();
        assert_eq!(draft.time, NaiveTime::from_hms_opt(9, 5, 0).unwrap());
    }

    #[test]
    fn test_appointment_payload_rejects_bad_time() {
        let result: std::result::Result<NewAppointment, _> = serde_json::from_str(
            r#"{"full_name":"Ann","email":"a@b.com","phone":"123","date":"2024-05-17","time":"25:00"}"#,
        );
        assert!(result.is_err());
    }
}
