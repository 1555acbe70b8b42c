use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::DeaneryError;

// 投票基础信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "vote.ts")]
pub struct Vote {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 允许排序的列
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "vote.ts")]
pub enum VoteOrderColumn {
    #[default]
    Id,
    Name,
    StartDate,
    EndDate,
}

impl std::str::FromStr for VoteOrderColumn {
    type Err = DeaneryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(VoteOrderColumn::Id),
            "name" => Ok(VoteOrderColumn::Name),
            "start_date" | "startDate" => Ok(VoteOrderColumn::StartDate),
            "end_date" | "endDate" => Ok(VoteOrderColumn::EndDate),
            other => Err(DeaneryError::invalid_input(format!(
                "Unknown order column '{other}'. Supported: id, name, start_date, end_date"
            ))),
        }
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export, export_to = "vote.ts")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = DeaneryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(DeaneryError::invalid_input(format!(
                "Unknown order direction '{s}'. Supported: ASC, DESC"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_column_allow_list() {
        assert_eq!("id".parse::<VoteOrderColumn>().unwrap(), VoteOrderColumn::Id);
        assert_eq!(
            "startDate".parse::<VoteOrderColumn>().unwrap(),
            VoteOrderColumn::StartDate
        );
        assert_eq!(
            "end_date".parse::<VoteOrderColumn>().unwrap(),
            VoteOrderColumn::EndDate
        );

        for bad in ["groups", "created_by", "id; DROP TABLE votes", ""] {
            let err = bad.parse::<VoteOrderColumn>().unwrap_err();
            assert_eq!(err.code(), "E006");
        }
    }

    #[test]
    fn test_sort_order_case_insensitive() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!("Desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("down".parse::<SortOrder>().is_err());
    }
}
