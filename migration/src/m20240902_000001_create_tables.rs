use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建学术组表
        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Groups::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Groups::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Groups::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Groups::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::GroupId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Students::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Students::DateOfBirth)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Students::OrderNumber)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Students::EdeboId).string_len(8).not_null())
                    .col(ColumnDef::new(Students::IsFullTime).boolean().not_null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生-课程关联表
        manager
            .create_table(
                Table::create()
                    .table(StudentCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentCourses::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentCourses::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(StudentCourses::StudentId)
                            .col(StudentCourses::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentCourses::Table, StudentCourses::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentCourses::Table, StudentCourses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建成绩表
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grades::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::CourseId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Grades::Grade)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建成绩变更历史表
        manager
            .create_table(
                Table::create()
                    .table(GradesHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradesHistory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GradesHistory::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradesHistory::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradesHistory::UserChangedId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GradesHistory::Grade).integer().not_null())
                    .col(
                        ColumnDef::new(GradesHistory::ReasonOfChange)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradesHistory::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradesHistory::Table, GradesHistory::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradesHistory::Table, GradesHistory::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建投票表
        manager
            .create_table(
                Table::create()
                    .table(Votes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Votes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Votes::Name).string().not_null())
                    .col(ColumnDef::new(Votes::StartDate).string_len(10).not_null())
                    .col(ColumnDef::new(Votes::EndDate).string_len(10).not_null())
                    .col(ColumnDef::new(Votes::CreatedBy).big_integer().null())
                    .col(ColumnDef::new(Votes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Votes::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 投票-学术组关联表
        manager
            .create_table(
                Table::create()
                    .table(VoteGroups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(VoteGroups::VoteId).big_integer().not_null())
                    .col(ColumnDef::new(VoteGroups::GroupId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(VoteGroups::VoteId)
                            .col(VoteGroups::GroupId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VoteGroups::Table, VoteGroups::VoteId)
                            .to(Votes::Table, Votes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VoteGroups::Table, VoteGroups::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 投票-必修课程关联表
        manager
            .create_table(
                Table::create()
                    .table(VoteRequiredCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VoteRequiredCourses::VoteId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VoteRequiredCourses::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(VoteRequiredCourses::VoteId)
                            .col(VoteRequiredCourses::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VoteRequiredCourses::Table, VoteRequiredCourses::VoteId)
                            .to(Votes::Table, Votes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VoteRequiredCourses::Table, VoteRequiredCourses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 投票-选修课程关联表
        manager
            .create_table(
                Table::create()
                    .table(VoteNotRequiredCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VoteNotRequiredCourses::VoteId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VoteNotRequiredCourses::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(VoteNotRequiredCourses::VoteId)
                            .col(VoteNotRequiredCourses::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VoteNotRequiredCourses::Table, VoteNotRequiredCourses::VoteId)
                            .to(Votes::Table, Votes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                VoteNotRequiredCourses::Table,
                                VoteNotRequiredCourses::CourseId,
                            )
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_group_id")
                    .table(Students::Table)
                    .col(Students::GroupId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_student_course")
                    .table(Grades::Table)
                    .col(Grades::StudentId)
                    .col(Grades::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_history_student_id")
                    .table(GradesHistory::Table)
                    .col(GradesHistory::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_vote_groups_group_id")
                    .table(VoteGroups::Table)
                    .col(VoteGroups::GroupId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(VoteNotRequiredCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VoteRequiredCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VoteGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Votes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GradesHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Groups {
    #[sea_orm(iden = "groups")]
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    GroupId,
    UserId,
    DateOfBirth,
    OrderNumber,
    EdeboId,
    IsFullTime,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentCourses {
    #[sea_orm(iden = "student_courses")]
    Table,
    StudentId,
    CourseId,
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    Id,
    StudentId,
    CourseId,
    Grade,
}

#[derive(DeriveIden)]
enum GradesHistory {
    #[sea_orm(iden = "grades_history")]
    Table,
    Id,
    StudentId,
    CourseId,
    UserChangedId,
    Grade,
    ReasonOfChange,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Votes {
    #[sea_orm(iden = "votes")]
    Table,
    Id,
    Name,
    StartDate,
    EndDate,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum VoteGroups {
    #[sea_orm(iden = "vote_groups")]
    Table,
    VoteId,
    GroupId,
}

#[derive(DeriveIden)]
enum VoteRequiredCourses {
    #[sea_orm(iden = "vote_required_courses")]
    Table,
    VoteId,
    CourseId,
}

#[derive(DeriveIden)]
enum VoteNotRequiredCourses {
    #[sea_orm(iden = "vote_not_required_courses")]
    Table,
    VoteId,
    CourseId,
}
