//! 预导入模块，方便使用

pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::grades_history::{
    ActiveModel as GradeHistoryActiveModel, Entity as GradesHistory, Model as GradeHistoryModel,
};
pub use super::groups::{ActiveModel as GroupActiveModel, Entity as Groups, Model as GroupModel};
pub use super::student_courses::Entity as StudentCourses;
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
pub use super::vote_groups::Entity as VoteGroups;
pub use super::vote_not_required_courses::Entity as VoteNotRequiredCourses;
pub use super::vote_required_courses::Entity as VoteRequiredCourses;
pub use super::votes::{ActiveModel as VoteActiveModel, Entity as Votes, Model as VoteModel};
