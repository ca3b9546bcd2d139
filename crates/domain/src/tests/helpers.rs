// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AcademicYear, Period, YearStatus};
use time::Date;

pub fn create_test_period(period_id: i64, name: &str, start_date: Date, end_date: Date) -> Period {
    Period {
        period_id,
        name: name.to_string(),
        start_date,
        end_date,
        is_locked: false,
        is_force_open: false,
    }
}

pub fn create_test_year(year_id: i64, status: YearStatus, is_operating: bool) -> AcademicYear {
    AcademicYear {
        year_id,
        year: u16::try_from(year_id).unwrap_or(2026),
        status,
        is_operating,
        start_date: None,
        end_date: None,
        periods: Vec::new(),
    }
}
