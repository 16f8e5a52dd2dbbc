//! Workflow actions on leaf tasks
//!
//! Each action validates its preconditions against the current state,
//! mutates the task, and then re-derives dependents and the parent chain
//! so the table is consistent again when the call returns. Failures are
//! all-or-nothing: nothing is mutated once an action has failed a check.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{Review, ReviewStatus, TaskId, TaskStatus, TimeLog, TimeUnit, UserId};

use super::{Workflow, WorkflowError};

impl Workflow {
    /// Logs effort for `resource` against a leaf task.
    ///
    /// Allowed while the status accepts time logs (ReadyToStart,
    /// WorkInProgress, PendingReview, HasRevision,
    /// DependencyHasRevision). A first log moves ReadyToStart to
    /// WorkInProgress; HasRevision also returns to WorkInProgress once
    /// revision work is logged.
    pub fn create_time_log(
        &mut self,
        id: &TaskId,
        resource: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<TimeLog, WorkflowError> {
        let task = self.fetch(id)?;
        if task.is_container() {
            return Err(WorkflowError::ContainerTask(id.clone(), "accept time logs"));
        }
        if !task.status.accepts_time_logs() {
            return Err(WorkflowError::InvalidStatus {
                action: "log time",
                status: task.status,
            });
        }

        let log = TimeLog::new(resource.clone(), start, end)?;

        let task = self.fetch_mut(id)?;
        task.time_logs.push(log.clone());
        task.touch();
        let status = task.status;

        debug!(task = %id, resource = %resource, seconds = log.seconds(), "time log created");

        if matches!(
            status,
            TaskStatus::ReadyToStart | TaskStatus::HasRevision
        ) {
            self.set_status(id, TaskStatus::WorkInProgress);
            self.update_parent_statuses(id)?;
        }

        Ok(log)
    }

    /// Opens a new review round on a WorkInProgress leaf: one open
    /// review per responsible user, all sharing the next round number.
    /// The task moves to PendingReview.
    pub fn request_review(&mut self, id: &TaskId) -> Result<Vec<Review>, WorkflowError> {
        let task = self.fetch(id)?;
        if task.is_container() {
            return Err(WorkflowError::ContainerTask(
                id.clone(),
                "request a review",
            ));
        }
        if task.status != TaskStatus::WorkInProgress {
            return Err(WorkflowError::InvalidStatus {
                action: "request a review",
                status: task.status,
            });
        }

        let reviewers = self.responsible(id)?;
        if reviewers.is_empty() {
            return Err(WorkflowError::NoResponsible(id.clone()));
        }

        let number = task.latest_review_number() + 1;
        let reviews: Vec<Review> = reviewers
            .into_iter()
            .map(|reviewer| Review::new(reviewer, number))
            .collect();

        let task = self.fetch_mut(id)?;
        task.reviews.extend(reviews.iter().cloned());
        task.touch();

        self.set_status(id, TaskStatus::PendingReview);
        self.update_parent_statuses(id)?;

        debug!(task = %id, round = number, reviews = reviews.len(), "review round opened");
        Ok(reviews)
    }

    /// Approves the reviewer's open review in the latest round.
    ///
    /// When the round has no open reviews left the task completes:
    /// dependents re-derive (a waiting task whose dependencies are all
    /// satisfied becomes ReadyToStart) and the parent chain
    /// re-aggregates.
    pub fn approve(&mut self, id: &TaskId, reviewer: &UserId) -> Result<(), WorkflowError> {
        let task = self.fetch(id)?;
        if task.status != TaskStatus::PendingReview {
            return Err(WorkflowError::InvalidStatus {
                action: "approve",
                status: task.status,
            });
        }

        let number = task.latest_review_number();
        let position = task
            .reviews
            .iter()
            .position(|r| {
                r.review_number == number
                    && &r.reviewer == reviewer
                    && r.status == ReviewStatus::New
            })
            .ok_or_else(|| WorkflowError::NoOpenReview {
                task: id.clone(),
                reviewer: reviewer.clone(),
            })?;

        let task = self.fetch_mut(id)?;
        task.reviews[position].status = ReviewStatus::Approved;
        task.touch();

        debug!(task = %id, reviewer = %reviewer, round = number, "review approved");

        let round_open = task
            .review_set(number)
            .iter()
            .any(|r| r.status == ReviewStatus::New);
        if !round_open {
            self.set_status(id, TaskStatus::Completed);
            self.propagate_from(id)?;
            debug!(task = %id, round = number, "review round closed, task completed");
        }
        Ok(())
    }

    /// Requests a revision on a PendingReview or Completed leaf.
    ///
    /// From PendingReview the current round's open reviews are replaced
    /// by a single revision review carrying the same round number. From
    /// Completed a new round opens and the revision propagates
    /// downstream: dependents re-derive and their edges flip to
    /// onstart. Either way the task moves to HasRevision and its
    /// schedule extends by the revision timings granted in the round,
    /// on top of the time already logged.
    pub fn request_revision(
        &mut self,
        id: &TaskId,
        reviewer: &UserId,
        description: &str,
        schedule_timing: Option<f64>,
        schedule_unit: Option<TimeUnit>,
    ) -> Result<Review, WorkflowError> {
        let task = self.fetch(id)?;
        if task.is_container() {
            return Err(WorkflowError::ContainerTask(
                id.clone(),
                "take a revision request",
            ));
        }

        let timing = schedule_timing.unwrap_or(1.0);
        let unit = schedule_unit.unwrap_or(TimeUnit::Hour);

        match task.status {
            TaskStatus::PendingReview => {
                let number = task.latest_review_number();
                let review =
                    Review::revision(reviewer.clone(), number, description, timing, unit);

                let task = self.fetch_mut(id)?;
                task.reviews
                    .retain(|r| !(r.review_number == number && r.status == ReviewStatus::New));
                task.reviews.push(review.clone());
                task.touch();

                self.set_status(id, TaskStatus::HasRevision);
                self.extend_schedule_from_round(id, number)?;
                self.update_parent_statuses(id)?;

                debug!(task = %id, round = number, "revision requested in open round");
                Ok(review)
            }
            TaskStatus::Completed => {
                let number = task.latest_review_number() + 1;
                let review =
                    Review::revision(reviewer.clone(), number, description, timing, unit);

                let task = self.fetch_mut(id)?;
                task.reviews.push(review.clone());
                task.touch();

                self.set_status(id, TaskStatus::HasRevision);
                self.extend_schedule_from_round(id, number)?;
                self.propagate_revision(id)?;
                self.update_parent_statuses(id)?;

                debug!(task = %id, round = number, "revision requested after completion");
                Ok(review)
            }
            status => Err(WorkflowError::InvalidStatus {
                action: "request a revision",
                status,
            }),
        }
    }

    /// Puts a WorkInProgress or DependencyHasRevision leaf on hold and
    /// drops its priority to zero. Holding an OnHold task is a no-op.
    pub fn hold(&mut self, id: &TaskId) -> Result<(), WorkflowError> {
        let task = self.fetch(id)?;
        if task.is_container() {
            return Err(WorkflowError::ContainerTask(id.clone(), "be put on hold"));
        }

        match task.status {
            TaskStatus::OnHold => Ok(()),
            TaskStatus::WorkInProgress | TaskStatus::DependencyHasRevision => {
                let task = self.fetch_mut(id)?;
                task.priority = 0;
                task.touch();

                self.set_status(id, TaskStatus::OnHold);
                self.propagate_from(id)
            }
            status => Err(WorkflowError::InvalidStatus {
                action: "hold",
                status,
            }),
        }
    }

    /// Stops a WorkInProgress or DependencyHasRevision leaf and clamps
    /// its schedule to the time already logged, leaving no slack for
    /// unperformed work. Dependents relax or escalate accordingly.
    /// Stopping a Stopped task is a no-op.
    pub fn stop(&mut self, id: &TaskId) -> Result<(), WorkflowError> {
        let task = self.fetch(id)?;
        if task.is_container() {
            return Err(WorkflowError::ContainerTask(id.clone(), "be stopped"));
        }

        match task.status {
            TaskStatus::Stopped => Ok(()),
            TaskStatus::WorkInProgress | TaskStatus::DependencyHasRevision => {
                let logged = self.total_logged_seconds(id)?;
                let unit_seconds =
                    task.schedule_model
                        .to_seconds(1.0, task.schedule_unit, &self.config);

                let task = self.fetch_mut(id)?;
                task.schedule_timing = logged / unit_seconds;
                task.touch();

                self.set_status(id, TaskStatus::Stopped);
                self.propagate_from(id)
            }
            status => Err(WorkflowError::InvalidStatus {
                action: "stop",
                status,
            }),
        }
    }

    /// Resumes an OnHold or Stopped leaf. The new status derives from
    /// the dependency set rather than returning to WorkInProgress
    /// unconditionally: with no dependencies the task is ReadyToStart or
    /// WorkInProgress depending on logged time; with every dependency
    /// satisfied it is WorkInProgress; otherwise it is
    /// DependencyHasRevision, pending the unfinished upstream work.
    pub fn resume(&mut self, id: &TaskId) -> Result<(), WorkflowError> {
        let task = self.fetch(id)?;
        if task.is_container() {
            return Err(WorkflowError::ContainerTask(id.clone(), "resume"));
        }

        match task.status {
            TaskStatus::OnHold | TaskStatus::Stopped => {
                let next = if task.depends.is_empty() {
                    if task.time_logs.is_empty() {
                        TaskStatus::ReadyToStart
                    } else {
                        TaskStatus::WorkInProgress
                    }
                } else {
                    let mut satisfied = true;
                    for edge in &task.depends {
                        if !self.fetch(&edge.depends_to)?.status.satisfies_dependents() {
                            satisfied = false;
                            break;
                        }
                    }
                    if satisfied {
                        TaskStatus::WorkInProgress
                    } else {
                        TaskStatus::DependencyHasRevision
                    }
                };

                self.set_status(id, next);
                self.propagate_from(id)
            }
            status => Err(WorkflowError::InvalidStatus {
                action: "resume",
                status,
            }),
        }
    }

    /// Re-derives the schedule after a revision: logged time plus every
    /// revision extension granted in the round, expressed in the task's
    /// own unit and model.
    fn extend_schedule_from_round(
        &mut self,
        id: &TaskId,
        review_number: u32,
    ) -> Result<(), WorkflowError> {
        let logged = self.total_logged_seconds(id)?;

        let task = self.fetch(id)?;
        let extension: f64 = task
            .review_set(review_number)
            .iter()
            .filter(|r| r.carries_revision())
            .map(|r| r.schedule_seconds(&self.config))
            .sum();
        let unit_seconds =
            task.schedule_model
                .to_seconds(1.0, task.schedule_unit, &self.config);

        let task = self.fetch_mut(id)?;
        task.schedule_timing = (logged + extension) / unit_seconds;
        task.touch();

        debug!(task = %id, round = review_number, extension_seconds = extension, "schedule extended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkflowConfig;
    use crate::domain::Task;
    use chrono::Duration;

    fn workflow() -> Workflow {
        Workflow::new(WorkflowConfig::default())
    }

    fn user(login: &str) -> UserId {
        UserId::new(login, Utc::now())
    }

    fn add_leaf(flow: &mut Workflow, name: &str, responsible: &UserId) -> TaskId {
        let mut task = Task::new(name, flow.config());
        task.add_responsible(responsible.clone());
        flow.add_task(task).unwrap()
    }

    fn log_hour(flow: &mut Workflow, id: &TaskId, resource: &UserId) {
        let start = Utc::now();
        flow.create_time_log(id, resource, start, start + Duration::hours(1))
            .unwrap();
    }

    /// Drives a ready task through work, review, and approval
    fn complete(flow: &mut Workflow, id: &TaskId, worker: &UserId, reviewer: &UserId) {
        log_hour(flow, id, worker);
        flow.request_review(id).unwrap();
        flow.approve(id, reviewer).unwrap();
    }

    #[test]
    fn first_time_log_starts_the_task() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");
        let comp = add_leaf(&mut flow, "Comp", &lead);

        assert_eq!(flow.task(&comp).unwrap().status, TaskStatus::ReadyToStart);
        log_hour(&mut flow, &comp, &artist);

        let task = flow.task(&comp).unwrap();
        assert_eq!(task.status, TaskStatus::WorkInProgress);
        assert_eq!(task.time_logs.len(), 1);
    }

    #[test]
    fn time_logs_are_gated_by_status() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");
        let anim = add_leaf(&mut flow, "Anim", &lead);
        let comp = add_leaf(&mut flow, "Comp", &lead);
        flow.add_dependency(&comp, &anim).unwrap();

        // comp waits on anim, so logging is rejected and nothing is recorded
        let start = Utc::now();
        let result = flow.create_time_log(&comp, &artist, start, start + Duration::hours(1));
        assert_eq!(
            result,
            Err(WorkflowError::InvalidStatus {
                action: "log time",
                status: TaskStatus::WaitingForDependency,
            })
        );
        assert!(flow.task(&comp).unwrap().time_logs.is_empty());
    }

    #[test]
    fn containers_reject_time_logs() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");
        let seq = add_leaf(&mut flow, "Seq010", &lead);
        flow.add_child_task(&seq, Task::new("Sh0010", flow.config()))
            .unwrap();

        let start = Utc::now();
        let result = flow.create_time_log(&seq, &artist, start, start + Duration::hours(1));
        assert!(matches!(result, Err(WorkflowError::ContainerTask(_, _))));
    }

    #[test]
    fn invalid_interval_creates_nothing() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");
        let comp = add_leaf(&mut flow, "Comp", &lead);

        let start = Utc::now();
        let result = flow.create_time_log(&comp, &artist, start, start);
        assert!(matches!(result, Err(WorkflowError::TimeLog(_))));
        assert!(flow.task(&comp).unwrap().time_logs.is_empty());
        assert_eq!(flow.task(&comp).unwrap().status, TaskStatus::ReadyToStart);
    }

    #[test]
    fn review_round_creates_one_review_per_responsible() {
        let mut flow = workflow();
        let lead = user("lead1");
        let supervisor = user("sup1");
        let artist = user("artist1");

        let mut task = Task::new("Comp", flow.config());
        task.add_responsible(lead.clone());
        task.add_responsible(supervisor.clone());
        let comp = flow.add_task(task).unwrap();

        log_hour(&mut flow, &comp, &artist);
        let reviews = flow.request_review(&comp).unwrap();

        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r.review_number == 1));
        assert!(reviews.iter().all(|r| r.status == ReviewStatus::New));
        assert_eq!(flow.task(&comp).unwrap().status, TaskStatus::PendingReview);
    }

    #[test]
    fn review_outside_wip_is_rejected() {
        let mut flow = workflow();
        let lead = user("lead1");
        let comp = add_leaf(&mut flow, "Comp", &lead);

        assert_eq!(
            flow.request_review(&comp),
            Err(WorkflowError::InvalidStatus {
                action: "request a review",
                status: TaskStatus::ReadyToStart,
            })
        );
    }

    #[test]
    fn approving_every_review_completes_the_task() {
        let mut flow = workflow();
        let lead = user("lead1");
        let supervisor = user("sup1");
        let artist = user("artist1");

        let mut task = Task::new("Comp", flow.config());
        task.add_responsible(lead.clone());
        task.add_responsible(supervisor.clone());
        let comp = flow.add_task(task).unwrap();

        log_hour(&mut flow, &comp, &artist);
        flow.request_review(&comp).unwrap();

        flow.approve(&comp, &lead).unwrap();
        assert_eq!(flow.task(&comp).unwrap().status, TaskStatus::PendingReview);

        flow.approve(&comp, &supervisor).unwrap();
        assert_eq!(flow.task(&comp).unwrap().status, TaskStatus::Completed);
    }

    #[test]
    fn approving_twice_is_rejected() {
        let mut flow = workflow();
        let lead = user("lead1");
        let supervisor = user("sup1");
        let artist = user("artist1");

        let mut task = Task::new("Comp", flow.config());
        task.add_responsible(lead.clone());
        task.add_responsible(supervisor.clone());
        let comp = flow.add_task(task).unwrap();

        log_hour(&mut flow, &comp, &artist);
        flow.request_review(&comp).unwrap();
        flow.approve(&comp, &lead).unwrap();

        assert!(matches!(
            flow.approve(&comp, &lead),
            Err(WorkflowError::NoOpenReview { .. })
        ));
    }

    #[test]
    fn completion_readies_waiting_dependents() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");
        let anim = add_leaf(&mut flow, "Anim", &lead);
        let comp = add_leaf(&mut flow, "Comp", &lead);
        flow.add_dependency(&comp, &anim).unwrap();

        complete(&mut flow, &anim, &artist, &lead);

        assert_eq!(flow.task(&anim).unwrap().status, TaskStatus::Completed);
        assert_eq!(flow.task(&comp).unwrap().status, TaskStatus::ReadyToStart);
    }

    #[test]
    fn revision_in_open_round_replaces_open_reviews() {
        let mut flow = workflow();
        let lead = user("lead1");
        let supervisor = user("sup1");
        let artist = user("artist1");

        let mut task = Task::new("Comp", flow.config());
        task.add_responsible(lead.clone());
        task.add_responsible(supervisor.clone());
        let comp = flow.add_task(task).unwrap();

        log_hour(&mut flow, &comp, &artist);
        flow.request_review(&comp).unwrap();

        let review = flow
            .request_revision(&comp, &lead, "tighten the edges", Some(2.0), None)
            .unwrap();

        assert_eq!(review.review_number, 1);
        assert_eq!(review.status, ReviewStatus::RequestedRevision);

        let task = flow.task(&comp).unwrap();
        assert_eq!(task.status, TaskStatus::HasRevision);
        // both open reviews were discarded, the revision is the round
        assert_eq!(task.review_set(1).len(), 1);
        // one hour logged plus the two-hour extension
        assert_eq!(task.schedule_timing, 3.0);
        assert_eq!(task.schedule_unit, TimeUnit::Hour);
    }

    #[test]
    fn revision_after_completion_opens_a_new_round() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");
        let comp = add_leaf(&mut flow, "Comp", &lead);

        complete(&mut flow, &comp, &artist, &lead);
        assert_eq!(flow.task(&comp).unwrap().latest_review_number(), 1);

        let review = flow
            .request_revision(&comp, &lead, "client notes", Some(4.0), None)
            .unwrap();

        assert_eq!(review.review_number, 2);
        let task = flow.task(&comp).unwrap();
        assert_eq!(task.status, TaskStatus::HasRevision);
        // one hour logged plus four granted
        assert_eq!(task.schedule_timing, 5.0);
    }

    #[test]
    fn revision_is_rejected_outside_review_or_completion() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");
        let comp = add_leaf(&mut flow, "Comp", &lead);

        assert!(matches!(
            flow.request_revision(&comp, &lead, "", None, None),
            Err(WorkflowError::InvalidStatus {
                action: "request a revision",
                ..
            })
        ));

        log_hour(&mut flow, &comp, &artist);
        assert!(matches!(
            flow.request_revision(&comp, &lead, "", None, None),
            Err(WorkflowError::InvalidStatus { .. })
        ));
    }

    #[test]
    fn revision_work_returns_the_task_to_wip() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");
        let comp = add_leaf(&mut flow, "Comp", &lead);

        log_hour(&mut flow, &comp, &artist);
        flow.request_review(&comp).unwrap();
        flow.request_revision(&comp, &lead, "", None, None).unwrap();
        assert_eq!(flow.task(&comp).unwrap().status, TaskStatus::HasRevision);

        log_hour(&mut flow, &comp, &artist);
        assert_eq!(flow.task(&comp).unwrap().status, TaskStatus::WorkInProgress);
    }

    #[test]
    fn hold_zeroes_priority_and_is_idempotent() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");
        let comp = add_leaf(&mut flow, "Comp", &lead);

        log_hour(&mut flow, &comp, &artist);
        flow.hold(&comp).unwrap();

        let task = flow.task(&comp).unwrap();
        assert_eq!(task.status, TaskStatus::OnHold);
        assert_eq!(task.priority, 0);
        // schedule is untouched by a hold
        assert_eq!(task.schedule_timing, 1.0);

        flow.hold(&comp).unwrap();
        assert_eq!(flow.task(&comp).unwrap().status, TaskStatus::OnHold);
    }

    #[test]
    fn hold_is_rejected_outside_wip_and_drev() {
        let mut flow = workflow();
        let lead = user("lead1");
        let comp = add_leaf(&mut flow, "Comp", &lead);

        assert_eq!(
            flow.hold(&comp),
            Err(WorkflowError::InvalidStatus {
                action: "hold",
                status: TaskStatus::ReadyToStart,
            })
        );
    }

    #[test]
    fn stop_clamps_the_schedule_to_logged_time() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");

        let mut task = Task::new("Comp", flow.config());
        task.add_responsible(lead.clone());
        task.set_schedule(10.0, TimeUnit::Hour);
        let comp = flow.add_task(task).unwrap();

        log_hour(&mut flow, &comp, &artist);
        flow.stop(&comp).unwrap();

        let task = flow.task(&comp).unwrap();
        assert_eq!(task.status, TaskStatus::Stopped);
        assert_eq!(task.schedule_timing, 1.0);

        // stopping again is a no-op
        flow.stop(&comp).unwrap();
        assert_eq!(flow.task(&comp).unwrap().status, TaskStatus::Stopped);
    }

    #[test]
    fn stop_readies_waiting_dependents() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");
        let anim = add_leaf(&mut flow, "Anim", &lead);
        let comp = add_leaf(&mut flow, "Comp", &lead);
        flow.add_dependency(&comp, &anim).unwrap();

        log_hour(&mut flow, &anim, &artist);
        flow.stop(&anim).unwrap();

        assert_eq!(flow.task(&comp).unwrap().status, TaskStatus::ReadyToStart);
    }

    #[test]
    fn stop_escalates_dependents_consuming_a_revision() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");
        let anim = add_leaf(&mut flow, "Anim", &lead);
        let comp = add_leaf(&mut flow, "Comp", &lead);
        flow.add_dependency(&comp, &anim).unwrap();

        // anim completes, comp starts on top of it
        complete(&mut flow, &anim, &artist, &lead);
        log_hour(&mut flow, &comp, &artist);

        // anim is revised after completion: comp holds a stale result
        flow.request_revision(&anim, &lead, "", None, None).unwrap();
        assert_eq!(
            flow.task(&comp).unwrap().status,
            TaskStatus::DependencyHasRevision
        );

        // the revision is abandoned; comp must now rework its own output
        log_hour(&mut flow, &anim, &artist);
        flow.stop(&anim).unwrap();
        assert_eq!(flow.task(&comp).unwrap().status, TaskStatus::HasRevision);
    }

    #[test]
    fn resume_without_dependencies_follows_logged_time() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");
        let comp = add_leaf(&mut flow, "Comp", &lead);

        log_hour(&mut flow, &comp, &artist);
        flow.hold(&comp).unwrap();
        flow.resume(&comp).unwrap();

        assert_eq!(flow.task(&comp).unwrap().status, TaskStatus::WorkInProgress);
    }

    #[test]
    fn resume_is_rejected_outside_hold_and_stop() {
        let mut flow = workflow();
        let lead = user("lead1");
        let comp = add_leaf(&mut flow, "Comp", &lead);

        assert_eq!(
            flow.resume(&comp),
            Err(WorkflowError::InvalidStatus {
                action: "resume",
                status: TaskStatus::ReadyToStart,
            })
        );
    }

    #[test]
    fn resume_with_active_dependency_lands_on_drev() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");
        let anim = add_leaf(&mut flow, "Anim", &lead);
        let comp = add_leaf(&mut flow, "Comp", &lead);
        flow.add_dependency(&comp, &anim).unwrap();

        // anim pauses, comp starts in the gap, then stops as well
        log_hour(&mut flow, &anim, &artist);
        flow.stop(&anim).unwrap();
        log_hour(&mut flow, &comp, &artist);
        flow.resume(&anim).unwrap();
        flow.stop(&comp).unwrap();

        // anim is working again, so comp resumes against unfinished work
        assert_eq!(flow.task(&anim).unwrap().status, TaskStatus::WorkInProgress);
        flow.resume(&comp).unwrap();
        assert_eq!(
            flow.task(&comp).unwrap().status,
            TaskStatus::DependencyHasRevision
        );
    }

    #[test]
    fn resume_with_satisfied_dependencies_returns_to_wip() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");
        let anim = add_leaf(&mut flow, "Anim", &lead);
        let comp = add_leaf(&mut flow, "Comp", &lead);
        flow.add_dependency(&comp, &anim).unwrap();

        complete(&mut flow, &anim, &artist, &lead);
        log_hour(&mut flow, &comp, &artist);
        flow.hold(&comp).unwrap();
        flow.resume(&comp).unwrap();

        assert_eq!(flow.task(&comp).unwrap().status, TaskStatus::WorkInProgress);
    }

    #[test]
    fn resume_with_all_dependencies_on_hold_lands_on_drev() {
        let mut flow = workflow();
        let lead = user("lead1");
        let artist = user("artist1");
        let anim = add_leaf(&mut flow, "Anim", &lead);
        let comp = add_leaf(&mut flow, "Comp", &lead);
        flow.add_dependency(&comp, &anim).unwrap();

        // both pause: anim on hold, comp stopped
        log_hour(&mut flow, &anim, &artist);
        flow.stop(&anim).unwrap();
        log_hour(&mut flow, &comp, &artist);
        flow.resume(&anim).unwrap();
        flow.hold(&anim).unwrap();
        flow.stop(&comp).unwrap();

        assert_eq!(flow.task(&anim).unwrap().status, TaskStatus::OnHold);
        flow.resume(&comp).unwrap();
        assert_eq!(
            flow.task(&comp).unwrap().status,
            TaskStatus::DependencyHasRevision
        );
    }
}
