use crate::model::{
    CompanyOnboardingStep, EmployeeOnboardingStep, FlowEvent, FlowFlags, FlowState,
    NavAvailability, Presence,
};

/// Apply one fetch outcome or deletion signal to the flags.
///
/// Pure: the returned record is the complete next state, so a caller never
/// observes a partially updated flag set. Deleting the company resets every
/// dependent flag in the same transition.
pub fn apply_event(flags: FlowFlags, event: FlowEvent) -> FlowFlags {
    let mut next = flags;
    match event {
        FlowEvent::CompanyFetched { found } => next.company = Presence::from_found(found),
        FlowEvent::LicenseFetched { found } => next.company_license = Presence::from_found(found),
        FlowEvent::BranchFetched { found } => next.branch = Presence::from_found(found),
        FlowEvent::ProfileFetched { found } => next.profile = Presence::from_found(found),
        FlowEvent::CompanyDeleted => {
            // License, branches and profiles live inside the company; one
            // transition resets the whole dependent chain.
            next.company = Presence::Absent;
            next.company_license = Presence::Absent;
            next.branch = Presence::Absent;
            next.profile = Presence::Absent;
        }
        FlowEvent::ProfileDeleted => next.profile = Presence::Absent,
    }
    next
}

/// Derive the current steps and navigation availability from the flags.
///
/// Observed, not commanded: there is no "next" input, only the presence of
/// independently fetched entities. A flag still `Unknown` derives exactly as
/// its last-known state dictates; the deriver never guesses a pending fetch
/// to absent.
pub fn derive(flags: FlowFlags) -> FlowState {
    let company_step = if !flags.company.is_present() {
        CompanyOnboardingStep::Company
    } else if !flags.company_license.is_present() {
        CompanyOnboardingStep::CompanyLicense
    } else if !flags.branch.is_present() {
        CompanyOnboardingStep::Branch
    } else {
        CompanyOnboardingStep::Completed
    };

    let employee_step = if flags.profile.is_present() {
        EmployeeOnboardingStep::Completed
    } else {
        EmployeeOnboardingStep::Employee
    };

    let company_completed = company_step == CompanyOnboardingStep::Completed;
    let nav = NavAvailability {
        company_settings: flags.company.is_present(),
        // Branch management opens with the branch onboarding step itself.
        branches: flags.company.is_present() && flags.company_license.is_present(),
        departments: company_completed,
        employees: company_completed,
        employee_onboarding: company_completed,
    };

    FlowState {
        company_step,
        employee_step,
        nav,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_flags() -> FlowFlags {
        FlowFlags {
            company: Presence::Present,
            company_license: Presence::Present,
            branch: Presence::Present,
            profile: Presence::Present,
        }
    }

    #[test]
    fn onboarding_chain_advances_step_by_step() {
        let mut flags = FlowFlags::default();
        assert_eq!(derive(flags).company_step, CompanyOnboardingStep::Company);

        flags = apply_event(flags, FlowEvent::CompanyFetched { found: true });
        assert_eq!(
            derive(flags).company_step,
            CompanyOnboardingStep::CompanyLicense
        );

        flags = apply_event(flags, FlowEvent::LicenseFetched { found: true });
        assert_eq!(derive(flags).company_step, CompanyOnboardingStep::Branch);

        flags = apply_event(flags, FlowEvent::BranchFetched { found: true });
        assert_eq!(derive(flags).company_step, CompanyOnboardingStep::Completed);
    }

    #[test]
    fn derivation_is_a_pure_function_of_the_flags() {
        let flags = completed_flags();
        assert_eq!(derive(flags), derive(flags));
    }

    #[test]
    fn company_deletion_resets_everything_in_one_transition() {
        let flags = apply_event(completed_flags(), FlowEvent::CompanyDeleted);
        let state = derive(flags);

        assert_eq!(state.company_step, CompanyOnboardingStep::Company);
        assert_eq!(state.employee_step, EmployeeOnboardingStep::Employee);
        assert!(!state.nav.company_settings);
        assert!(!state.nav.branches);
        assert!(!state.nav.departments);
        assert!(!state.nav.employees);
        assert!(!state.nav.employee_onboarding);
    }

    #[test]
    fn profile_deletion_only_reopens_employee_onboarding() {
        let flags = apply_event(completed_flags(), FlowEvent::ProfileDeleted);
        let state = derive(flags);

        assert_eq!(state.company_step, CompanyOnboardingStep::Completed);
        assert_eq!(state.employee_step, EmployeeOnboardingStep::Employee);
        assert!(state.nav.employee_onboarding);
    }

    #[test]
    fn pending_fetch_keeps_last_known_state() {
        // License fetch still in flight: the flag stays Unknown, the step
        // does not advance past it, and nothing is flipped to Absent.
        let flags = apply_event(FlowFlags::default(), FlowEvent::CompanyFetched { found: true });
        assert_eq!(flags.company_license, Presence::Unknown);
        assert_eq!(
            derive(flags).company_step,
            CompanyOnboardingStep::CompanyLicense
        );
    }

    #[test]
    fn failed_fetch_counts_as_absent() {
        let flags = apply_event(completed_flags(), FlowEvent::LicenseFetched { found: false });
        assert_eq!(flags.company_license, Presence::Absent);
        assert_eq!(
            derive(flags).company_step,
            CompanyOnboardingStep::CompanyLicense
        );
    }

    #[test]
    fn employee_onboarding_is_gated_on_company_completion() {
        let mut flags = FlowFlags::default();
        flags.profile = Presence::Absent;
        let state = derive(flags);
        assert_eq!(state.employee_step, EmployeeOnboardingStep::Employee);
        assert!(!state.nav.employee_onboarding);

        let state = derive(completed_flags());
        assert!(state.nav.employee_onboarding);
    }
}
