use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const EMPTY_REQUIREMENT_MESSAGE: &str = "Please enter a requirement first!";

/// Built-in demo requirements, selectable as "Sample 1" .. "Sample 5".
pub const SAMPLE_REQUIREMENTS: [&str; 5] = [
    "The system must allow nurses to access patient allergy information securely within 3 seconds of login.",
    "Only authorized staff with proper credentials can modify patient medication records, with all changes logged and auditable.",
    "Patient data must be encrypted both at rest and in transit, complying with HIPAA privacy regulations.",
    "The application must provide real-time alerts for critical lab values exceeding normal ranges.",
    "User authentication must support multi-factor authentication for accessing sensitive patient data.",
];

/// Canned test cases, paired by position with `SAMPLE_REQUIREMENTS`.
pub const SAMPLE_TEST_CASES: [&str; 5] = [
    "Test Case: Access Patient Allergy Information
- Step 1: Launch the application as a user with the ‘nurse’ role.
- Step 2: Log in with valid nurse credentials.
- Step 3: Navigate to a patient’s profile.
- Step 4: Attempt to access the allergy information.
- Expected Result: Allergy information loads within 3 seconds and is only visible to authorized nurse users; access is logged.",
    "Test Case: Modify Patient Medication Record - Authorization & Logging
- Step 1: Log in as an unauthorized user and attempt to modify medication data.
- Expected Result: Access denied; modification attempt logged.
- Step 2: Log in as an authorized staff member.
- Step 3: Change a patient’s medication record.
- Expected Result: Change is saved; modified by, timestamp, and old/new data are logged in the audit trail.",
    "Test Case: Data Encryption and HIPAA Compliance
- Step 1: Review system configuration for encryption at rest (e.g., database settings).
- Expected Result: Patient tables/fields utilize encryption (AES-256 or stronger).
- Step 2: Use a network analyzer to check patient data transmission during login and data access.
- Expected Result: All transmitted patient data is encrypted (HTTPS/TLS), and unencrypted transmissions are blocked.",
    "Test Case: Real-Time Critical Lab Alerts
- Step 1: Log in as clinician.
- Step 2: Enter a lab result for a patient that exceeds a configured critical value.
- Expected Result: Application instantly sends an alert/pop-up to the responsible clinician with patient and lab details.
- Step 3: Check the notification/audit log.
- Expected Result: Event recorded; alert is traceable to the patient and clinician notified.",
    "Test Case: Multi-factor Authentication Enforcement
- Step 1: Attempt login with correct username/password alone.
- Expected Result: System prompts for second authentication factor (SMS, OTP, app code, etc.)
- Step 2: Enter valid second factor.
- Expected Result: User is granted access to sensitive patient data.
- Step 3: Attempt access without completing MFA.
- Expected Result: Access denied until MFA is complete.",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleRequirement {
    pub index: usize,
    pub label: String,
    pub text: String,
}

/// All samples with their 1-based index.
pub fn sample_requirements() -> Vec<SampleRequirement> {
    SAMPLE_REQUIREMENTS
        .iter()
        .enumerate()
        .map(|(i, text)| SampleRequirement {
            index: i + 1,
            label: format!("Sample {}", i + 1),
            text: text.to_string(),
        })
        .collect()
}

/// Looks up a sample by its 1-based index.
pub fn sample_requirement(index: usize) -> Option<&'static str> {
    index
        .checked_sub(1)
        .and_then(|i| SAMPLE_REQUIREMENTS.get(i))
        .copied()
}

/// Strips surrounding whitespace, including the ASCII separators
/// U+001C..U+001F that `str::trim` keeps.
pub fn trim_requirement(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
}

/// A requirement as submitted, kept verbatim (no trimming).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Requirement {
    #[validate(custom(function = "validate_not_blank"))]
    pub text: String,
}

impl Requirement {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

fn validate_not_blank(text: &str) -> Result<(), ValidationError> {
    if trim_requirement(text).is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(EMPTY_REQUIREMENT_MESSAGE.into());
        return Err(err);
    }
    Ok(())
}
