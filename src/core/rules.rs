use crate::domain::model::{
    NewAppointment, NewContact, FULL_NAME_MAX_LENGTH, NAME_MAX_LENGTH, PHONE_MAX_LENGTH,
    SUBJECT_MAX_LENGTH,
};
use crate::utils::error::Result;
use crate::utils::validation::{validate_email, validate_max_length, Validate};

impl Validate for NewContact {
    fn validate(&self) -> Result<()> {
        validate_max_length("name", &self.name, NAME_MAX_LENGTH)?;
        validate_email("email", &self.email)?;
        validate_max_length("subject", &self.subject, SUBJECT_MAX_LENGTH)?;
        Ok(())
    }
}

// date/time 沒有範圍限制，過去的日期也接受
impl Validate for NewAppointment {
    fn validate(&self) -> Result<()> {
        validate_max_length("full_name", &self.full_name, FULL_NAME_MAX_LENGTH)?;
        validate_email("email", &self.email)?;
        validate_max_length("phone", &self.phone, PHONE_MAX_LENGTH)?;
        Ok(())
    }
}
