use serde::{Deserialize, Serialize};

/// One roster entry for a class period.
///
/// `student_id` is the external identifier the school system knows the
/// student by; it is what the output records carry, never the row index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Sorts a roster into the order the printed sheet lists students: last
/// name, then first name.
///
/// This order is load-bearing. The sheet is printed from it and the
/// assembler pairs detected rows with students positionally, so the
/// roster handed to processing must be sorted exactly the way the sheet
/// was generated.
pub fn sort_roster(students: &mut [Student]) {
    students.sort_by(|a, b| {
        a.last_name
            .cmp(&b.last_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
    });
}
