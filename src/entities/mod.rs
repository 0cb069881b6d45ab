//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod employee;
pub mod employee_medical_limit;
pub mod leave_request;
pub mod medical_benefit;
pub mod medical_category_limit;

// Re-export specific types to avoid conflicts
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use employee_medical_limit::{
    Column as EmployeeMedicalLimitColumn, Entity as EmployeeMedicalLimit,
    Model as EmployeeMedicalLimitModel,
};
pub use leave_request::{
    Column as LeaveRequestColumn, Entity as LeaveRequest, Model as LeaveRequestModel,
};
pub use medical_benefit::{
    Column as MedicalBenefitColumn, Entity as MedicalBenefit, Model as MedicalBenefitModel,
};
pub use medical_category_limit::{
    Column as MedicalCategoryLimitColumn, Entity as MedicalCategoryLimit,
    Model as MedicalCategoryLimitModel,
};
